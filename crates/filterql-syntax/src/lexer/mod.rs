use crate::lexer::{
    error::LexError,
    token::{Token, TokenKind},
};
use pest::{Parser, iterators::Pair};
use pest_derive::Parser;

pub mod error;
pub mod token;

/// Token classifier generated from the lexical grammar. Rule alternation
/// order in `filter.pest` is the classification priority.
#[derive(Parser)]
#[grammar = "grammar/filter.pest"]
pub struct FilterLexer;

#[derive(Default)]
pub struct Lexer {
    tokens: Vec<Token>,
}

impl Lexer {
    pub fn new() -> Self {
        Lexer { tokens: Vec::new() }
    }

    pub fn tokenize(&mut self, input: &str) -> Result<Vec<Token>, LexError> {
        self.tokens.clear();

        let pairs = FilterLexer::parse(Rule::token_stream, input)
            .map_err(LexError::from_pest_error)?;

        for pair in pairs {
            for inner in pair.into_inner() {
                self.process_pair(inner)?;
            }
        }

        Ok(self.tokens.clone())
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    fn process_pair(&mut self, pair: Pair<Rule>) -> Result<(), LexError> {
        let span = pair.as_span();
        let (line, column) = span.start_pos().line_col();
        let lexeme = span.as_str().to_string();

        let kind = match pair.as_rule() {
            Rule::ws => TokenKind::Whitespace,

            Rule::keyword => match lexeme.to_ascii_lowercase().as_str() {
                "not" => TokenKind::Not,
                "in" => TokenKind::In,
                "true" => TokenKind::True,
                _ => TokenKind::False,
            },

            Rule::ident => TokenKind::Identifier(lexeme.clone()),

            Rule::int => {
                let value = lexeme
                    .parse::<i64>()
                    .map_err(|_| LexError::InvalidNumber(lexeme.clone()))?;
                TokenKind::Int(value)
            }
            Rule::float => {
                let value = lexeme
                    .parse::<f64>()
                    .map_err(|_| LexError::InvalidNumber(lexeme.clone()))?;
                TokenKind::Float(value)
            }
            Rule::string => TokenKind::String(unescape(&lexeme)),

            Rule::separator => match lexeme.as_str() {
                "." => TokenKind::Dot,
                _ => TokenKind::Comma,
            },

            Rule::bracket => match lexeme.as_str() {
                "[" => TokenKind::LeftBracket,
                "]" => TokenKind::RightBracket,
                "(" => TokenKind::LeftParen,
                _ => TokenKind::RightParen,
            },

            Rule::operator => match lexeme.as_str() {
                "=" => TokenKind::Equal,
                "!=" => TokenKind::NotEqual,
                "<" => TokenKind::Less,
                ">" => TokenKind::Greater,
                "<=" => TokenKind::LessOrEqual,
                ">=" => TokenKind::GreaterOrEqual,
                _ => TokenKind::Colon,
            },

            Rule::EOI => TokenKind::Eof,

            _ => return Ok(()),
        };

        self.tokens.push(Token {
            kind,
            lexeme,
            line,
            column,
            span: (span.start(), span.end()),
        });

        Ok(())
    }
}

/// Strips the surrounding quotes and resolves backslash escapes in a single
/// pass, so the capture is the literal character sequence the quotes
/// delimited.
fn unescape(raw: &str) -> String {
    let inner = &raw[1..raw.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some(other) => out.push(other),
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}
