//! Token definitions for the Monlox lexer.

use std::fmt;

use crate::span::Span;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(f64),
    StringLiteral(String),
    BoolLiteral(bool),
    Identifier(String),

    Let,
    Fn,
    Return,
    If,
    Else,
    Null,
    And,
    Or,

    Plus,
    Minus,
    Star,
    Slash,
    Equal,
    EqualEqual,
    BangEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Bang,

    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Comma,
    Colon,
    Semicolon,

    Eof,
}

const KEYWORDS: &[(&str, TokenKind)] = &[
    ("let", TokenKind::Let),
    ("fn", TokenKind::Fn),
    ("return", TokenKind::Return),
    ("if", TokenKind::If),
    ("else", TokenKind::Else),
    ("true", TokenKind::BoolLiteral(true)),
    ("false", TokenKind::BoolLiteral(false)),
    ("null", TokenKind::Null),
    ("and", TokenKind::And),
    ("or", TokenKind::Or),
];

impl TokenKind {
    /// The reserved word spelled `ident`, if any.
    pub fn keyword(ident: &str) -> Option<TokenKind> {
        KEYWORDS
            .iter()
            .find(|(word, _)| *word == ident)
            .map(|(_, kind)| kind.clone())
    }

    /// Source text of a token that is always spelled the same way.
    pub fn lexeme(&self) -> Option<&'static str> {
        let text = match self {
            TokenKind::Number(_)
            | TokenKind::StringLiteral(_)
            | TokenKind::BoolLiteral(_)
            | TokenKind::Identifier(_) => return None,
            TokenKind::Let => "let",
            TokenKind::Fn => "fn",
            TokenKind::Return => "return",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::Null => "null",
            TokenKind::And => "and",
            TokenKind::Or => "or",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Equal => "=",
            TokenKind::EqualEqual => "==",
            TokenKind::BangEqual => "!=",
            TokenKind::Less => "<",
            TokenKind::LessEqual => "<=",
            TokenKind::Greater => ">",
            TokenKind::GreaterEqual => ">=",
            TokenKind::Bang => "!",
            TokenKind::LeftParen => "(",
            TokenKind::RightParen => ")",
            TokenKind::LeftBrace => "{",
            TokenKind::RightBrace => "}",
            TokenKind::LeftBracket => "[",
            TokenKind::RightBracket => "]",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::Semicolon => ";",
            TokenKind::Eof => "EOF",
        };
        Some(text)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(n) => write!(f, "{}", n),
            TokenKind::StringLiteral(s) => write!(f, "\"{}\"", s),
            TokenKind::BoolLiteral(b) => write!(f, "{}", b),
            TokenKind::Identifier(name) => f.write_str(name),
            fixed => f.write_str(fixed.lexeme().unwrap_or_default()),
        }
    }
}

/// A token with its kind and source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Zero-width end-of-input marker at the given position.
    pub fn eof(position: usize, line: usize, column: usize) -> Self {
        Self::new(TokenKind::Eof, Span::new(position, position, line, column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(TokenKind::keyword("fn"), Some(TokenKind::Fn));
        assert_eq!(TokenKind::keyword("true"), Some(TokenKind::BoolLiteral(true)));
        assert_eq!(TokenKind::keyword("function"), None);
    }

    #[test]
    fn test_display_matches_source_text() {
        assert_eq!(TokenKind::LeftBrace.to_string(), "{");
        assert_eq!(TokenKind::GreaterEqual.to_string(), ">=");
        assert_eq!(TokenKind::Identifier("x".into()).to_string(), "x");
        assert_eq!(TokenKind::StringLiteral("hi".into()).to_string(), "\"hi\"");
        assert_eq!(TokenKind::Eof.to_string(), "EOF");
    }
}
