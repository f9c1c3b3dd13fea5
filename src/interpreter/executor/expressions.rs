//! Expression evaluation.
//!
//! `evaluate` dispatches on the node kind and delegates to the focused
//! submodules.

use crate::ast::{Expr, ExprKind};
use crate::interpreter::value::Object;

use super::{ControlFlow, Interpreter, RuntimeResult};

impl Interpreter {
    /// Evaluate an expression.
    pub(crate) fn evaluate(&mut self, expr: &Expr) -> RuntimeResult<ControlFlow> {
        let line = expr.line();

        match &expr.kind {
            // Literals
            ExprKind::Number(n) => Ok(ControlFlow::Normal(Object::Number(*n))),
            ExprKind::StringLiteral(s) => Ok(ControlFlow::Normal(Object::String(s.clone()))),
            ExprKind::Boolean(b) => Ok(ControlFlow::Normal(Object::Boolean(*b))),
            ExprKind::Null => Ok(ControlFlow::Normal(Object::Null)),

            // Variables
            ExprKind::Identifier(name) => self.evaluate_identifier(name, line),

            // Operators
            ExprKind::Prefix { operator, operand } => {
                let operand = value!(self.evaluate(operand));
                self.evaluate_prefix(*operator, operand, line)
            }

            ExprKind::Infix {
                left,
                operator,
                right,
            } => {
                let left = value!(self.evaluate(left));
                let right = value!(self.evaluate(right));
                self.evaluate_infix(left, *operator, right, line)
            }

            ExprKind::Logical {
                left,
                operator,
                right,
            } => self.evaluate_logical(left, *operator, right),

            // Control flow
            ExprKind::If {
                condition,
                consequence,
                alternative,
            } => self.evaluate_if(condition, consequence, alternative.as_ref()),

            ExprKind::Function(literal) => self.evaluate_function_literal(literal),

            ExprKind::Call { callee, arguments } => self.evaluate_call(callee, arguments, line),

            // Collections
            ExprKind::Array(elements) => self.evaluate_array(elements),

            ExprKind::Hash(pairs) => self.evaluate_hash(pairs),

            ExprKind::Index { left, index } => {
                let left = value!(self.evaluate(left));
                let index = value!(self.evaluate(index));
                self.evaluate_index(left, index, line)
            }
        }
    }
}
