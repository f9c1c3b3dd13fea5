//! Array literal evaluation.

use crate::ast::Expr;
use crate::interpreter::executor::{ControlFlow, Interpreter, RuntimeResult};
use crate::interpreter::value::Object;

impl Interpreter {
    pub(crate) fn evaluate_array(&mut self, elements: &[Expr]) -> RuntimeResult<ControlFlow> {
        let mut values = Vec::with_capacity(elements.len());
        for element in elements {
            values.push(value!(self.evaluate(element)));
        }
        Ok(ControlFlow::Normal(Object::array(values)))
    }
}
