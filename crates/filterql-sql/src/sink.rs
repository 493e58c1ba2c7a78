//! The sink that receives compiled predicate fragments.
//!
//! Fragments are written with `?` markers; the sink owns placeholder
//! numbering so Postgres-style `$n` placeholders stay consistent across
//! fragments.

use crate::dialect::Dialect;
use filterql_syntax::Value;

pub trait QuerySink {
    /// Dialect used when the compiler needs identifier quoting or map
    /// extraction syntax for the fragments it emits.
    fn dialect(&self) -> &dyn Dialect;

    /// Accepts one parameterized predicate fragment together with its bound
    /// parameters, in marker order. Fragments are combined conjunctively.
    fn push_predicate(&mut self, fragment: String, params: Vec<Value>);
}

/// Accumulates predicate fragments into a WHERE clause.
pub struct WhereClause<'a> {
    dialect: &'a dyn Dialect,
    fragments: Vec<String>,
    params: Vec<Value>,
}

impl<'a> WhereClause<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        WhereClause {
            dialect,
            fragments: Vec::new(),
            params: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Consumes the clause and returns the AND-combined SQL and parameters.
    /// Zero fragments yield the empty string, not a vacuous `TRUE`.
    pub fn finish(self) -> (String, Vec<Value>) {
        let clause = self
            .fragments
            .iter()
            .map(|fragment| format!("({})", fragment))
            .collect::<Vec<_>>()
            .join(" AND ");
        (clause, self.params)
    }
}

impl QuerySink for WhereClause<'_> {
    fn dialect(&self) -> &dyn Dialect {
        self.dialect
    }

    fn push_predicate(&mut self, fragment: String, params: Vec<Value>) {
        let mut bound = String::with_capacity(fragment.len() + 4);
        let mut index = self.params.len();
        for c in fragment.chars() {
            if c == '?' {
                bound.push_str(&self.dialect.placeholder(index));
                index += 1;
            } else {
                bound.push(c);
            }
        }
        debug_assert_eq!(index - self.params.len(), params.len());

        self.fragments.push(bound);
        self.params.extend(params);
    }
}
