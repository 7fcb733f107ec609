use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Identifier(String),
    Number(f64),
    Operator(Operator),
    Symbol(Symbol),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Plus,
    Minus,
    Star,
    Slash,

    /// `!`
    Not,
    /// `&` or `&&`
    And,
    /// `|` or `||`
    Or,
    /// `=` or `==`
    Equal,
    /// `!=`
    NotEqual,

    Less,
    Greater,
    LessEqual,
    GreaterEqual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    LParen,
    RParen,
    LBrace,
    RBrace,
    Dot,
    Semicolon,
    Comma,
    Question,
    Colon,

    /// The `if` keyword.
    If,
}

impl Operator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Not => "!",
            Self::And => "&&",
            Self::Or => "||",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
        }
    }
}

impl Symbol {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::Dot => ".",
            Self::Semicolon => ";",
            Self::Comma => ",",
            Self::Question => "?",
            Self::Colon => ":",
            Self::If => "if",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(s) => write!(f, "identifier '{s}'"),
            Self::Number(v) => write!(f, "number {v}"),
            Self::Operator(o) => write!(f, "operator '{}'", o.as_str()),
            Self::Symbol(s) => write!(f, "symbol '{}'", s.as_str()),
        }
    }
}
