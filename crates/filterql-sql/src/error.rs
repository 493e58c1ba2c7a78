use filterql_syntax::{Operator, SyntaxError};
use thiserror::Error;

/// Error raised by a [`FilterHook`](crate::config::FilterHook) to abort the
/// whole compilation.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct HookError {
    message: String,
}

impl HookError {
    pub fn new(message: impl Into<String>) -> Self {
        HookError {
            message: message.into(),
        }
    }
}

impl From<&str> for HookError {
    fn from(message: &str) -> Self {
        HookError::new(message)
    }
}

#[derive(Error, Debug)]
pub enum FilterError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error("field {field:?}: not found in table {table:?}")]
    UnknownField { field: String, table: String },

    #[error("field {field:?}: not a string map column")]
    NotAMap { field: String },

    #[error("field {field:?}: at most one map key segment is supported")]
    NestedPath { field: String },

    #[error("field {field:?}: hook: {source}")]
    Hook { field: String, source: HookError },

    #[error("field {field:?}: IN requires at least one value")]
    EmptyIn { field: String },

    #[error("field {field:?}: contains requires a string value")]
    ContainsType { field: String },

    #[error("field {field:?}: operator {op} takes {expected} value(s), got {got}")]
    Arity {
        field: String,
        op: Operator,
        expected: usize,
        got: usize,
    },
}
