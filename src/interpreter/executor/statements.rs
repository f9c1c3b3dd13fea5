//! Statement execution.

use crate::ast::*;
use crate::interpreter::value::Object;

use super::{ControlFlow, Interpreter, RuntimeResult};

impl Interpreter {
    /// Execute a statement, returning control flow information.
    pub(crate) fn execute(&mut self, stmt: &Stmt) -> RuntimeResult<ControlFlow> {
        match &stmt.kind {
            StmtKind::Expression(expr) => self.evaluate(expr),

            StmtKind::Let { name, value } => {
                let value = value!(self.evaluate(value));
                self.environment.borrow_mut().set(name.name.clone(), value);
                Ok(ControlFlow::Normal(Object::Null))
            }

            StmtKind::Return(expr) => {
                let value = value!(self.evaluate(expr));
                Ok(ControlFlow::Return(value))
            }
        }
    }
}
