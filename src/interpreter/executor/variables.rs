//! Identifier resolution.

use crate::error::RuntimeError;
use crate::interpreter::builtins;
use crate::interpreter::value::Object;

use super::{ControlFlow, Interpreter, RuntimeResult};

impl Interpreter {
    /// Look a name up in the scope chain, then in the builtin table.
    pub(crate) fn evaluate_identifier(
        &mut self,
        name: &str,
        line: usize,
    ) -> RuntimeResult<ControlFlow> {
        if let Some(value) = self.environment.borrow().get(name) {
            return Ok(ControlFlow::Normal(value));
        }
        match builtins::lookup(name) {
            Some(builtin) => Ok(ControlFlow::Normal(Object::Builtin(builtin))),
            None => self.fail(RuntimeError::identifier_not_found(name, line)),
        }
    }
}
