//! `if` / `else` evaluation.

use crate::ast::{Block, Expr};
use crate::interpreter::executor::{ControlFlow, Interpreter, RuntimeResult};
use crate::interpreter::value::Object;

impl Interpreter {
    /// Evaluate an if expression. Both branches run in the current scope.
    pub(crate) fn evaluate_if(
        &mut self,
        condition: &Expr,
        consequence: &Block,
        alternative: Option<&Block>,
    ) -> RuntimeResult<ControlFlow> {
        let condition = value!(self.evaluate(condition));

        if condition.is_truthy() {
            self.execute_block(consequence)
        } else if let Some(alternative) = alternative {
            self.execute_block(alternative)
        } else {
            Ok(ControlFlow::Normal(Object::Null))
        }
    }
}
