use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
    pub column: usize,
    pub span: (usize, usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Whitespace,

    // Keywords (matched case-insensitively)
    Not,
    In,
    True,
    False,

    // Literals
    Identifier(String),
    Int(i64),
    Float(f64),
    String(String),

    // Separators
    Dot,
    Comma,

    // Brackets
    LeftBracket,
    RightBracket,
    LeftParen,
    RightParen,

    // Operators
    Equal,          // =
    NotEqual,       // !=
    Less,           // <
    Greater,        // >
    LessOrEqual,    // <=
    GreaterOrEqual, // >=
    Colon,          // :

    // Special
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Whitespace => write!(f, "whitespace"),
            TokenKind::Not => write!(f, "not"),
            TokenKind::In => write!(f, "in"),
            TokenKind::True => write!(f, "true"),
            TokenKind::False => write!(f, "false"),
            TokenKind::Identifier(s) => write!(f, "{}", s),
            TokenKind::Int(v) => write!(f, "{}", v),
            TokenKind::Float(v) => write!(f, "{}", v),
            TokenKind::String(s) => write!(f, "\"{}\"", s),
            TokenKind::Dot => write!(f, "."),
            TokenKind::Comma => write!(f, ","),
            TokenKind::LeftBracket => write!(f, "["),
            TokenKind::RightBracket => write!(f, "]"),
            TokenKind::LeftParen => write!(f, "("),
            TokenKind::RightParen => write!(f, ")"),
            TokenKind::Equal => write!(f, "="),
            TokenKind::NotEqual => write!(f, "!="),
            TokenKind::Less => write!(f, "<"),
            TokenKind::Greater => write!(f, ">"),
            TokenKind::LessOrEqual => write!(f, "<="),
            TokenKind::GreaterOrEqual => write!(f, ">="),
            TokenKind::Colon => write!(f, ":"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}
