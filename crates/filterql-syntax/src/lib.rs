//! Front-end for the list-filtering expression language.
//!
//! Expression text such as
//! `firstName = "Attila" loginCount: [1,100] not tags in ("a","b")`
//! is tokenized, parsed into an AST of implicitly AND-ed conditions, and
//! converted into a flat typed [`Filter`] that SQL back-ends compile into
//! parameterized predicates.

use thiserror::Error;

pub mod ast;
pub mod filter;
pub mod lexer;
pub mod operator;
pub mod parser;

pub use filter::{Condition, ConvertError, Filter, Value};
pub use lexer::error::LexError;
pub use operator::Operator;
pub use parser::ParseError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SyntaxError {
    #[error("lex: {0}")]
    Lex(#[from] LexError),

    #[error("parse: {0}")]
    Parse(#[from] ParseError),

    #[error("convert: {0}")]
    Convert(#[from] ConvertError),
}

/// Parses a filter expression into a [`Filter`].
///
/// The empty string is a valid expression denoting "no filter" and yields
/// a filter with zero conditions.
pub fn parse(input: &str) -> Result<Filter, SyntaxError> {
    let tokens = lexer::Lexer::new().tokenize(input)?;
    tracing::trace!(tokens = tokens.len(), "tokenized filter expression");

    let expr = parser::Parser::new(&tokens).parse()?;
    Ok(filter::convert(expr)?)
}
