//! Function literal evaluation.

use std::rc::Rc;

use crate::ast::FunctionLiteral;
use crate::interpreter::executor::{ControlFlow, Interpreter, RuntimeResult};
use crate::interpreter::value::{Function, Object};

impl Interpreter {
    /// Evaluate a function literal into a closure over the current scope.
    pub(crate) fn evaluate_function_literal(
        &mut self,
        literal: &Rc<FunctionLiteral>,
    ) -> RuntimeResult<ControlFlow> {
        let func = Function::new(literal.clone(), self.environment.clone());
        Ok(ControlFlow::Normal(Object::Function(Rc::new(func))))
    }
}
