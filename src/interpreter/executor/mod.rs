//! Tree-walking interpreter for Monlox.

/// Unwrap a `RuntimeResult<ControlFlow>` into its value, returning early from
/// the enclosing evaluator on an error or a `return` signal.
macro_rules! value {
    ($flow:expr) => {
        match $flow? {
            $crate::interpreter::executor::ControlFlow::Normal(value) => value,
            flow @ $crate::interpreter::executor::ControlFlow::Return(_) => return Ok(flow),
        }
    };
}

mod expressions;
mod operators;
mod statements;
mod variables;

pub mod access;
pub mod calls;
pub mod control;
pub mod objects;


use std::cell::RefCell;
use std::rc::Rc;

use crate::ast::*;
use crate::error::RuntimeError;
use crate::interpreter::environment::Environment;
use crate::interpreter::value::Object;

pub(crate) type RuntimeResult<T> = Result<T, RuntimeError>;

/// Outcome of evaluating a node that did not fail.
///
/// `Return` unwinds through enclosing blocks until a function call or the
/// program boundary unwraps it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ControlFlow {
    Normal(Object),
    Return(Object),
}

impl ControlFlow {
    /// The carried value, treating a return signal as a plain value.
    pub(crate) fn into_value(self) -> Object {
        match self {
            ControlFlow::Normal(value) | ControlFlow::Return(value) => value,
        }
    }
}

/// The Monlox interpreter.
pub struct Interpreter {
    pub(crate) environment: Rc<RefCell<Environment>>,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_environment(Rc::new(RefCell::new(Environment::new())))
    }

    /// Create an interpreter whose global scope is `environment`, so that
    /// bindings persist across several `eval` calls (REPL sessions).
    pub fn with_environment(environment: Rc<RefCell<Environment>>) -> Self {
        Self { environment }
    }

    pub fn global_env(&self) -> &Rc<RefCell<Environment>> {
        &self.environment
    }

    /// Evaluate a program, folding a runtime failure into an `Object::Error`.
    pub fn eval(&mut self, program: &Program) -> Object {
        match self.interpret(program) {
            Ok(value) => value,
            Err(error) => Object::Error(error),
        }
    }

    /// Interpret a complete program, yielding the value of its last
    /// statement. A top-level `return` stops the program with its value.
    pub fn interpret(&mut self, program: &Program) -> RuntimeResult<Object> {
        let mut result = Object::Null;
        for stmt in &program.statements {
            match self.execute(stmt)? {
                ControlFlow::Normal(value) => result = value,
                ControlFlow::Return(value) => return Ok(value),
            }
        }
        Ok(result)
    }

    /// Run the statements of a block in the current scope.
    pub(crate) fn execute_block(&mut self, block: &Block) -> RuntimeResult<ControlFlow> {
        let mut result = ControlFlow::Normal(Object::Null);
        for stmt in &block.statements {
            result = self.execute(stmt)?;
            if let ControlFlow::Return(_) = result {
                break;
            }
        }
        Ok(result)
    }

    /// Run a block with `env` as the current scope, restoring the previous
    /// scope afterwards even when the block fails.
    pub(crate) fn execute_block_in(
        &mut self,
        block: &Block,
        env: Environment,
    ) -> RuntimeResult<ControlFlow> {
        let previous = std::mem::replace(&mut self.environment, Rc::new(RefCell::new(env)));
        let result = self.execute_block(block);
        self.environment = previous;
        result
    }

    /// Log a runtime error at the point it is raised.
    pub(crate) fn fail<T>(&self, error: RuntimeError) -> RuntimeResult<T> {
        tracing::debug!(line = error.line(), %error, "runtime error");
        Err(error)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluate `program` with `env` as its global scope.
pub fn eval(program: &Program, env: Rc<RefCell<Environment>>) -> Object {
    Interpreter::with_environment(env).eval(program)
}
