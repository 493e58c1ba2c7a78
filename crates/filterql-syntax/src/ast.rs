//! Abstract syntax tree for filter expressions.
//!
//! An expression is a whitespace-delimited sequence of conditions; the
//! juxtaposition itself is the conjunction, there is no AND token.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Expression {
    pub conditions: Vec<ConditionNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionNode {
    /// True to invert the sense of the condition.
    pub not: bool,
    /// Dotted field path, one entry per identifier segment.
    pub field: Vec<String>,
    pub body: ConditionBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConditionBody {
    /// `field <op> value`. Carries the operator's source token text; the
    /// converter resolves it against the operator registry.
    Compare { op: String, value: Literal },
    /// `field: [start, end]`
    Between { start: Literal, end: Literal },
    /// `field IN (v1, v2, ...)`
    In { values: Vec<Literal> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    String(String),
    Boolean(bool),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(v) => write!(f, "{}", v),
            Literal::Float(v) => write!(f, "{}", v),
            Literal::String(s) => write!(f, "\"{}\"", s),
            Literal::Boolean(b) => write!(f, "{}", b),
        }
    }
}
