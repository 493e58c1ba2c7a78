use crate::lexer::Rule;
use pest::error::Error as PestError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("invalid filter expression at line {line}, column {column}: {message}")]
    Syntax {
        message: String,
        line: usize,
        column: usize,
        snippet: String,
    },

    #[error("invalid number literal: {0}")]
    InvalidNumber(String),
}

impl LexError {
    pub(crate) fn from_pest_error(err: PestError<Rule>) -> Self {
        use pest::error::LineColLocation;

        let (line, column) = match err.line_col {
            LineColLocation::Pos((l, c)) => (l, c),
            LineColLocation::Span((l, c), _) => (l, c),
        };

        let message = format!("{}", err.variant);
        let snippet = err.line().to_string();

        LexError::Syntax {
            message,
            line,
            column,
            snippet,
        }
    }

    /// Format error with the offending source line and a caret marker.
    pub fn format_error(&self) -> String {
        match self {
            LexError::Syntax {
                message,
                line,
                column,
                snippet,
            } => {
                format!(
                    "error at line {}, column {}:\n{}\n{}^\n{}",
                    line,
                    column,
                    snippet,
                    " ".repeat(column.saturating_sub(1)),
                    message
                )
            }
            _ => self.to_string(),
        }
    }
}
