use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison operator between a field and one or more constants in a
/// filter expression.
///
/// The set is closed: `Contains` and `Range` have no single-token spelling
/// in source text, they are derived structurally from the `field: value`
/// and `field: [a, b]` forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Equal,
    NotEqual,
    Less,
    Greater,
    LessOrEqual,
    GreaterOrEqual,
    Contains,
    In,
    Range,
}

impl Operator {
    /// Resolves an operator token to its registry entry. `in` matches
    /// case-insensitively since it is lexed as a keyword. Returns `None`
    /// for unknown tokens; the caller decides whether that is fatal.
    pub fn from_token(token: &str) -> Option<Operator> {
        match token {
            "=" => Some(Operator::Equal),
            "!=" => Some(Operator::NotEqual),
            "<" => Some(Operator::Less),
            ">" => Some(Operator::Greater),
            "<=" => Some(Operator::LessOrEqual),
            ">=" => Some(Operator::GreaterOrEqual),
            ":" => Some(Operator::Contains),
            "[]" => Some(Operator::Range),
            _ if token.eq_ignore_ascii_case("in") => Some(Operator::In),
            _ => None,
        }
    }

    /// Canonical token for the operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::NotEqual => "!=",
            Operator::Less => "<",
            Operator::Greater => ">",
            Operator::LessOrEqual => "<=",
            Operator::GreaterOrEqual => ">=",
            Operator::Contains => ":",
            Operator::In => "in",
            Operator::Range => "[]",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_token_round_trip() {
        for op in [
            Operator::Equal,
            Operator::NotEqual,
            Operator::Less,
            Operator::Greater,
            Operator::LessOrEqual,
            Operator::GreaterOrEqual,
            Operator::Contains,
            Operator::In,
            Operator::Range,
        ] {
            assert_eq!(Operator::from_token(op.as_str()), Some(op));
        }
    }

    #[test]
    fn test_in_is_case_insensitive() {
        assert_eq!(Operator::from_token("IN"), Some(Operator::In));
        assert_eq!(Operator::from_token("In"), Some(Operator::In));
    }

    #[test]
    fn test_unknown_token() {
        assert_eq!(Operator::from_token("=="), None);
        assert_eq!(Operator::from_token(""), None);
    }
}
