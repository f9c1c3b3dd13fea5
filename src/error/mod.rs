//! Error types for all evaluation phases.

use crate::ast::{InfixOp, PrefixOp};
use crate::interpreter::value::ObjectType;
use crate::span::Span;
use thiserror::Error;

/// Lexer errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexerError {
    #[error("Unexpected character '{0}' at {1}")]
    UnexpectedChar(char, Span),

    #[error("Unterminated string at {0}")]
    UnterminatedString(Span),

    #[error("Invalid escape sequence '\\{0}' at {1}")]
    InvalidEscape(char, Span),

    #[error("Invalid number '{0}' at {1}")]
    InvalidNumber(String, Span),
}

impl LexerError {
    pub fn unexpected_char(c: char, span: Span) -> Self {
        Self::UnexpectedChar(c, span)
    }

    pub fn unterminated_string(span: Span) -> Self {
        Self::UnterminatedString(span)
    }

    pub fn invalid_escape(c: char, span: Span) -> Self {
        Self::InvalidEscape(c, span)
    }

    pub fn invalid_number(s: String, span: Span) -> Self {
        Self::InvalidNumber(s, span)
    }

    pub fn span(&self) -> Span {
        match self {
            Self::UnexpectedChar(_, span) => *span,
            Self::UnterminatedString(span) => *span,
            Self::InvalidEscape(_, span) => *span,
            Self::InvalidNumber(_, span) => *span,
        }
    }
}

/// Parser errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParserError {
    #[error("Unexpected token '{found}', expected {expected} at {span}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("Unexpected end of file at {0}")]
    UnexpectedEof(Span),

    #[error("No prefix parse rule for '{found}' at {span}")]
    NoPrefixRule { found: String, span: Span },
}

impl ParserError {
    pub fn unexpected_token(
        expected: impl Into<String>,
        found: impl Into<String>,
        span: Span,
    ) -> Self {
        Self::UnexpectedToken {
            expected: expected.into(),
            found: found.into(),
            span,
        }
    }

    pub fn unexpected_eof(span: Span) -> Self {
        Self::UnexpectedEof(span)
    }

    pub fn no_prefix_rule(found: impl Into<String>, span: Span) -> Self {
        Self::NoPrefixRule {
            found: found.into(),
            span,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Self::UnexpectedToken { span, .. } => *span,
            Self::UnexpectedEof(span) => *span,
            Self::NoPrefixRule { span, .. } => *span,
        }
    }
}

/// Runtime errors.
///
/// These surface to programs as `Object::Error`. The rendered text always
/// starts with the 1-based line of the node that raised the error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    #[error("on line {line}: type mismatch: {left} {operator} {right}")]
    TypeMismatch {
        left: ObjectType,
        operator: InfixOp,
        right: ObjectType,
        line: usize,
    },

    #[error("on line {line}: unknown operator: {operator}{operand}")]
    UnknownPrefixOperator {
        operator: PrefixOp,
        operand: ObjectType,
        line: usize,
    },

    #[error("on line {line}: unknown operator: {left} {operator} {right}")]
    UnknownInfixOperator {
        left: ObjectType,
        operator: InfixOp,
        right: ObjectType,
        line: usize,
    },

    #[error("on line {line}: identifier not found: {name}")]
    IdentifierNotFound { name: String, line: usize },

    #[error("on line {line}: unusable as hash key: {kind}")]
    UnusableHashKey { kind: ObjectType, line: usize },

    #[error("on line {line}: wrong number of arguments. expected={expected}, got={got}")]
    WrongArity {
        expected: usize,
        got: usize,
        line: usize,
    },

    #[error("on line {line}: {message}")]
    InvalidArgument { message: String, line: usize },

    #[error("on line {line}: not a function: {kind}")]
    NotCallable { kind: ObjectType, line: usize },

    #[error("on line {line}: index operator not supported: {left}[{index}]")]
    IndexNotSupported {
        left: ObjectType,
        index: ObjectType,
        line: usize,
    },
}

impl RuntimeError {
    pub fn type_mismatch(
        left: ObjectType,
        operator: InfixOp,
        right: ObjectType,
        line: usize,
    ) -> Self {
        Self::TypeMismatch {
            left,
            operator,
            right,
            line,
        }
    }

    pub fn unknown_prefix(operator: PrefixOp, operand: ObjectType, line: usize) -> Self {
        Self::UnknownPrefixOperator {
            operator,
            operand,
            line,
        }
    }

    pub fn unknown_infix(
        left: ObjectType,
        operator: InfixOp,
        right: ObjectType,
        line: usize,
    ) -> Self {
        Self::UnknownInfixOperator {
            left,
            operator,
            right,
            line,
        }
    }

    pub fn identifier_not_found(name: impl Into<String>, line: usize) -> Self {
        Self::IdentifierNotFound {
            name: name.into(),
            line,
        }
    }

    pub fn unusable_hash_key(kind: ObjectType, line: usize) -> Self {
        Self::UnusableHashKey { kind, line }
    }

    pub fn wrong_arity(expected: usize, got: usize, line: usize) -> Self {
        Self::WrongArity {
            expected,
            got,
            line,
        }
    }

    pub fn invalid_argument(message: impl Into<String>, line: usize) -> Self {
        Self::InvalidArgument {
            message: message.into(),
            line,
        }
    }

    pub fn not_callable(kind: ObjectType, line: usize) -> Self {
        Self::NotCallable { kind, line }
    }

    pub fn index_not_supported(left: ObjectType, index: ObjectType, line: usize) -> Self {
        Self::IndexNotSupported { left, index, line }
    }

    /// The source line that triggered this error.
    pub fn line(&self) -> usize {
        match self {
            Self::TypeMismatch { line, .. } => *line,
            Self::UnknownPrefixOperator { line, .. } => *line,
            Self::UnknownInfixOperator { line, .. } => *line,
            Self::IdentifierNotFound { line, .. } => *line,
            Self::UnusableHashKey { line, .. } => *line,
            Self::WrongArity { line, .. } => *line,
            Self::InvalidArgument { line, .. } => *line,
            Self::NotCallable { line, .. } => *line,
            Self::IndexNotSupported { line, .. } => *line,
        }
    }
}

/// A unified error type for the library entry points.
#[derive(Debug, Error)]
pub enum MonloxError {
    #[error("Lexer error: {0}")]
    Lexer(#[from] LexerError),

    #[error("Parser error: {0}")]
    Parser(#[from] ParserError),

    #[error("Runtime error: {0}")]
    Runtime(#[from] RuntimeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
