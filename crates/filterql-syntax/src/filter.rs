//! Conversion from the parsed AST into the flat, typed filter consumed by
//! predicate compilers.

use crate::{
    ast::{ConditionBody, ConditionNode, Expression, Literal},
    operator::Operator,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A typed scalar on the right-hand side of a condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Int(i64),
    Float(f64),
    String(String),
    Boolean(bool),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::String(s) => write!(f, "{}", s),
            Value::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<Literal> for Value {
    fn from(literal: Literal) -> Self {
        match literal {
            Literal::Int(v) => Value::Int(v),
            Literal::Float(v) => Value::Float(v),
            Literal::String(s) => Value::String(s),
            Literal::Boolean(b) => Value::Boolean(b),
        }
    }
}

/// A single filtering condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Field to compare, dot-joined for map-key access.
    pub field: String,
    /// True to invert the sense of the condition.
    pub not: bool,
    /// Check to perform.
    pub op: Operator,
    /// Values supplied to the operator, in source order.
    pub values: Vec<Value>,
}

/// A parsed filter expression. Conditions are implicitly AND-ed and keep
/// their source order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Filter {
    pub conditions: Vec<Condition>,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// The grammar accepted an operator token the registry does not know.
    /// Grammar and registry must stay in lock-step, so this is a defect,
    /// not a user input error.
    #[error("operator {0:?} accepted by the grammar but missing from the registry")]
    UnknownOperator(String),

    #[error("field {field:?}: IN requires at least one value")]
    EmptyIn { field: String },

    #[error("field {field:?}: boolean literals are only valid in comparisons")]
    BooleanOperand { field: String },
}

pub fn convert(expr: Expression) -> Result<Filter, ConvertError> {
    let mut conditions = Vec::with_capacity(expr.conditions.len());
    for node in expr.conditions {
        conditions.push(convert_node(node)?);
    }
    Ok(Filter { conditions })
}

fn convert_node(node: ConditionNode) -> Result<Condition, ConvertError> {
    let field = node.field.join(".");

    match node.body {
        ConditionBody::Compare { op, value } => {
            let op =
                Operator::from_token(&op).ok_or_else(|| ConvertError::UnknownOperator(op))?;
            // A boolean fully determines the value list.
            let values = match value {
                Literal::Boolean(b) => vec![Value::Boolean(b)],
                other => vec![Value::from(other)],
            };
            Ok(Condition {
                field,
                not: node.not,
                op,
                values,
            })
        }
        ConditionBody::Between { start, end } => {
            let values = vec![operand(&field, start)?, operand(&field, end)?];
            Ok(Condition {
                field,
                not: node.not,
                op: Operator::Range,
                values,
            })
        }
        ConditionBody::In { values } => {
            if values.is_empty() {
                return Err(ConvertError::EmptyIn { field });
            }
            let values = values
                .into_iter()
                .map(|literal| operand(&field, literal))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Condition {
                field,
                not: node.not,
                op: Operator::In,
                values,
            })
        }
    }
}

fn operand(field: &str, literal: Literal) -> Result<Value, ConvertError> {
    match literal {
        Literal::Boolean(_) => Err(ConvertError::BooleanOperand {
            field: field.to_string(),
        }),
        other => Ok(Value::from(other)),
    }
}
