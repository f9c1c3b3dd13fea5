//! Abstract Syntax Tree for Monlox.

pub mod expr;
pub mod stmt;

pub use expr::{Expr, ExprKind, FunctionLiteral, Identifier, InfixOp, LogicalOp, PrefixOp};
pub use stmt::{Block, Program, Stmt, StmtKind};
