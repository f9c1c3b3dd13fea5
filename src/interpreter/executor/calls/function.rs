//! Function call evaluation.

use crate::ast::Expr;
use crate::error::RuntimeError;
use crate::interpreter::environment::Environment;
use crate::interpreter::executor::{ControlFlow, Interpreter, RuntimeResult};
use crate::interpreter::value::{Function, Object};

impl Interpreter {
    /// Evaluate a call expression: the callee first, then the arguments left
    /// to right.
    pub(crate) fn evaluate_call(
        &mut self,
        callee: &Expr,
        arguments: &[Expr],
        line: usize,
    ) -> RuntimeResult<ControlFlow> {
        let callee = value!(self.evaluate(callee));

        let mut args = Vec::with_capacity(arguments.len());
        for argument in arguments {
            args.push(value!(self.evaluate(argument)));
        }

        self.call_value(callee, args, line).map(ControlFlow::Normal)
    }

    /// Apply a function value to already evaluated arguments.
    pub(crate) fn call_value(
        &mut self,
        callee: Object,
        args: Vec<Object>,
        line: usize,
    ) -> RuntimeResult<Object> {
        match callee {
            Object::Function(func) => self.call_function(&func, args, line),
            Object::Builtin(builtin) => {
                tracing::debug!(name = builtin.name, args = args.len(), line, "builtin call");
                builtin.call(line, args).or_else(|error| self.fail(error))
            }
            other => self.fail(RuntimeError::not_callable(other.kind(), line)),
        }
    }

    /// Call a user function: bind the arguments in a fresh scope enclosed by
    /// the function's captured environment and run the body there.
    pub(crate) fn call_function(
        &mut self,
        func: &Function,
        args: Vec<Object>,
        line: usize,
    ) -> RuntimeResult<Object> {
        if args.len() != func.arity() {
            return self.fail(RuntimeError::wrong_arity(func.arity(), args.len(), line));
        }

        tracing::trace!(arity = func.arity(), line, "call function");

        let mut call_env = Environment::with_enclosing(func.env.clone());
        for (param, value) in func.literal.parameters.iter().zip(args) {
            call_env.set(param.name.clone(), value);
        }

        self.execute_block_in(&func.literal.body, call_env)
            .map(ControlFlow::into_value)
    }
}
