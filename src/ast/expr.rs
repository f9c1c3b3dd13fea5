//! Expression AST nodes.

use std::fmt;
use std::rc::Rc;

use crate::ast::stmt::Block;
use crate::span::Span;

/// An expression in the AST.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// The 1-based source line this expression is attributed to.
    pub fn line(&self) -> usize {
        self.span.line
    }
}

/// A bound name: `let` targets and function parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

impl Identifier {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// Parameters and body of a `fn` literal.
///
/// Shared behind an `Rc` so that evaluating the literal captures it without
/// copying the body.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionLiteral {
    pub parameters: Vec<Identifier>,
    pub body: Block,
}

/// All expression variants.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Number literal: 42, 10.45
    Number(f64),
    /// String literal: "hello"
    StringLiteral(String),
    /// Boolean literal: true, false
    Boolean(bool),
    /// Null literal
    Null,

    /// Variable reference: foo
    Identifier(String),

    /// Prefix operation: -x, !x
    Prefix {
        operator: PrefixOp,
        operand: Box<Expr>,
    },

    /// Infix operation: a + b
    Infix {
        left: Box<Expr>,
        operator: InfixOp,
        right: Box<Expr>,
    },

    /// Short-circuit logic: a and b, a or b
    Logical {
        left: Box<Expr>,
        operator: LogicalOp,
        right: Box<Expr>,
    },

    /// if (cond) { ... } else { ... }
    If {
        condition: Box<Expr>,
        consequence: Block,
        alternative: Option<Block>,
    },

    /// fn(x, y) { ... }
    Function(Rc<FunctionLiteral>),

    /// Call: callee(a, b)
    Call {
        callee: Box<Expr>,
        arguments: Vec<Expr>,
    },

    /// Array literal: [1, 2, 3]
    Array(Vec<Expr>),

    /// Index: left[index]
    Index { left: Box<Expr>, index: Box<Expr> },

    /// Hash literal: {"key": value, ...}
    Hash(Vec<(Expr, Expr)>),
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOp {
    Not,
    Negate,
}

/// Arithmetic, comparison and equality operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Equal,
    NotEqual,
}

/// Short-circuiting operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

impl fmt::Display for PrefixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefixOp::Not => write!(f, "!"),
            PrefixOp::Negate => write!(f, "-"),
        }
    }
}

impl fmt::Display for InfixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            InfixOp::Add => "+",
            InfixOp::Subtract => "-",
            InfixOp::Multiply => "*",
            InfixOp::Divide => "/",
            InfixOp::Less => "<",
            InfixOp::LessEqual => "<=",
            InfixOp::Greater => ">",
            InfixOp::GreaterEqual => ">=",
            InfixOp::Equal => "==",
            InfixOp::NotEqual => "!=",
        };
        write!(f, "{}", symbol)
    }
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalOp::And => write!(f, "and"),
            LogicalOp::Or => write!(f, "or"),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for FunctionLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fn(")?;
        write_separated(f, &self.parameters)?;
        write!(f, ") {}", self.body)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Number(n) => write!(f, "{}", n),
            ExprKind::StringLiteral(s) => write_quoted(f, s),
            ExprKind::Boolean(b) => write!(f, "{}", b),
            ExprKind::Null => write!(f, "null"),
            ExprKind::Identifier(name) => write!(f, "{}", name),
            ExprKind::Prefix { operator, operand } => write!(f, "({}{})", operator, operand),
            ExprKind::Infix {
                left,
                operator,
                right,
            } => write!(f, "({} {} {})", left, operator, right),
            ExprKind::Logical {
                left,
                operator,
                right,
            } => write!(f, "({} {} {})", left, operator, right),
            ExprKind::If {
                condition,
                consequence,
                alternative,
            } => {
                write!(f, "if {} {}", condition, consequence)?;
                if let Some(alternative) = alternative {
                    write!(f, "else {}", alternative)?;
                }
                Ok(())
            }
            ExprKind::Function(literal) => write!(f, "{}", literal),
            ExprKind::Call { callee, arguments } => {
                write!(f, "{}(", callee)?;
                write_separated(f, arguments)?;
                write!(f, ")")
            }
            ExprKind::Array(elements) => {
                write!(f, "[")?;
                write_separated(f, elements)?;
                write!(f, "]")
            }
            ExprKind::Index { left, index } => write!(f, "({}[{}])", left, index),
            ExprKind::Hash(pairs) => {
                write!(f, "{{")?;
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

fn write_separated<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

/// Write a string literal back in source form, re-escaping what the scanner
/// unescaped.
fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    write!(f, "\"")?;
    for c in s.chars() {
        match c {
            '"' => write!(f, "\\\"")?,
            '\\' => write!(f, "\\\\")?,
            '\n' => write!(f, "\\n")?,
            '\t' => write!(f, "\\t")?,
            '\r' => write!(f, "\\r")?,
            c => write!(f, "{}", c)?,
        }
    }
    write!(f, "\"")
}
