//! Recursive-descent parser over the token stream.
//!
//! ```text
//! Expression := ( WS? Condition )*
//! Condition  := ( NOT WS )? FieldPath ( WS? Compare
//!                                     | WS? ":" WS? "[" WS? Between WS? "]"
//!                                     | WS IN WS? "(" WS? In ")" )
//! FieldPath  := Identifier ( "." Identifier )*
//! Compare    := Operator WS? Value
//! Between    := Value WS? "," WS? Value
//! In         := Value WS? ( "," WS? Value WS? )*
//! Value      := Int | Float | String | TRUE | FALSE
//! ```
//!
//! The only decision point needing lookahead is after a `:`; everything
//! else is a straight single-token dispatch.

use crate::{
    ast::{ConditionBody, ConditionNode, Expression, Literal},
    lexer::token::{Token, TokenKind},
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("unexpected {found} at line {line}, column {column}: expected {}", .expected.join(" or "))]
pub struct ParseError {
    pub found: String,
    pub line: usize,
    pub column: usize,
    /// Byte offset of the offending token in the source text.
    pub offset: usize,
    /// Token descriptions that would have been accepted in this position.
    pub expected: Vec<String>,
}

pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Parser { tokens, pos: 0 }
    }

    pub fn parse(mut self) -> Result<Expression, ParseError> {
        if self.tokens.is_empty() {
            return Ok(Expression::default());
        }

        let mut conditions = Vec::new();
        self.skip_ws();
        while !matches!(self.peek(), TokenKind::Eof) {
            conditions.push(self.condition()?);
            self.skip_ws();
        }
        Ok(Expression { conditions })
    }

    fn condition(&mut self) -> Result<ConditionNode, ParseError> {
        let not = if matches!(self.peek(), TokenKind::Not) {
            self.bump();
            // Mandatory whitespace after NOT keeps the negation from ever
            // gluing onto the field path.
            if !self.skip_ws() {
                return Err(self.unexpected(&["whitespace"]));
            }
            true
        } else {
            false
        };

        let field = self.field_path()?;
        let ws = self.skip_ws();

        let body = match self.peek() {
            TokenKind::Colon => self.colon_body()?,
            TokenKind::Equal
            | TokenKind::NotEqual
            | TokenKind::Less
            | TokenKind::Greater
            | TokenKind::LessOrEqual
            | TokenKind::GreaterOrEqual => self.compare_body()?,
            TokenKind::In if ws => self.in_body()?,
            _ => {
                return Err(self.unexpected(&[
                    "\"=\"", "\"!=\"", "\"<\"", "\">\"", "\"<=\"", "\">=\"", "\":\"", "\"in\"",
                ]));
            }
        };

        Ok(ConditionNode { not, field, body })
    }

    fn field_path(&mut self) -> Result<Vec<String>, ParseError> {
        let mut segments = vec![self.identifier()?];
        while matches!(self.peek(), TokenKind::Dot) {
            self.bump();
            segments.push(self.identifier()?);
        }
        Ok(segments)
    }

    fn compare_body(&mut self) -> Result<ConditionBody, ParseError> {
        let op = self.current().lexeme.clone();
        self.bump();
        self.skip_ws();
        let value = self.value()?;
        Ok(ConditionBody::Compare { op, value })
    }

    /// A `:` opens either a range (`field: [a, b]`) or a contains
    /// comparison (`field: value`); look past the colon at the
    /// bracket-or-value token to pick the branch.
    fn colon_body(&mut self) -> Result<ConditionBody, ParseError> {
        let colon = self.current().lexeme.clone();
        self.bump();
        self.skip_ws();

        if matches!(self.peek(), TokenKind::LeftBracket) {
            self.bump();
            self.skip_ws();
            let start = self.value()?;
            self.skip_ws();
            self.expect(&TokenKind::Comma, "\",\"")?;
            self.skip_ws();
            let end = self.value()?;
            self.skip_ws();
            self.expect(&TokenKind::RightBracket, "\"]\"")?;
            Ok(ConditionBody::Between { start, end })
        } else {
            let value = self.value()?;
            Ok(ConditionBody::Compare { op: colon, value })
        }
    }

    fn in_body(&mut self) -> Result<ConditionBody, ParseError> {
        self.bump(); // the IN keyword
        self.skip_ws();
        self.expect(&TokenKind::LeftParen, "\"(\"")?;
        self.skip_ws();

        let mut values = vec![self.value()?];
        self.skip_ws();
        loop {
            match self.peek() {
                TokenKind::Comma => {
                    self.bump();
                    self.skip_ws();
                    values.push(self.value()?);
                    self.skip_ws();
                }
                TokenKind::RightParen => {
                    self.bump();
                    break;
                }
                _ => return Err(self.unexpected(&["\",\"", "\")\""])),
            }
        }
        Ok(ConditionBody::In { values })
    }

    fn identifier(&mut self) -> Result<String, ParseError> {
        match self.peek() {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.bump();
                Ok(name)
            }
            _ => Err(self.unexpected(&["an identifier"])),
        }
    }

    fn value(&mut self) -> Result<Literal, ParseError> {
        let literal = match self.peek() {
            TokenKind::Int(v) => Literal::Int(*v),
            TokenKind::Float(v) => Literal::Float(*v),
            TokenKind::String(s) => Literal::String(s.clone()),
            TokenKind::True => Literal::Boolean(true),
            TokenKind::False => Literal::Boolean(false),
            _ => {
                return Err(self.unexpected(&[
                    "an integer",
                    "a float",
                    "a string",
                    "\"true\"",
                    "\"false\"",
                ]));
            }
        };
        self.bump();
        Ok(literal)
    }

    fn expect(&mut self, kind: &TokenKind, describe: &str) -> Result<(), ParseError> {
        if self.peek() == kind {
            self.bump();
            Ok(())
        } else {
            Err(self.unexpected(&[describe]))
        }
    }

    fn skip_ws(&mut self) -> bool {
        let mut seen = false;
        while matches!(self.peek(), TokenKind::Whitespace) {
            self.bump();
            seen = true;
        }
        seen
    }

    fn peek(&self) -> &TokenKind {
        &self.current().kind
    }

    fn current(&self) -> &Token {
        let idx = self.pos.min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    fn bump(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn unexpected(&self, expected: &[&str]) -> ParseError {
        let token = self.current();
        let found = match &token.kind {
            TokenKind::Eof => "end of input".to_string(),
            _ => format!("\"{}\"", token.lexeme),
        };
        ParseError {
            found,
            line: token.line,
            column: token.column,
            offset: token.span.0,
            expected: expected.iter().map(|s| s.to_string()).collect(),
        }
    }
}
