//! Prefix, infix and logical operator evaluation.

use crate::ast::*;
use crate::error::RuntimeError;
use crate::interpreter::value::Object;

use super::{ControlFlow, Interpreter, RuntimeResult};

impl Interpreter {
    pub(crate) fn evaluate_prefix(
        &self,
        operator: PrefixOp,
        operand: Object,
        line: usize,
    ) -> RuntimeResult<ControlFlow> {
        let value = match (operator, operand) {
            (PrefixOp::Not, operand) => Object::Boolean(!operand.is_truthy()),
            (PrefixOp::Negate, Object::Number(n)) => Object::Number(-n),
            (PrefixOp::Negate, operand) => {
                return self.fail(RuntimeError::unknown_prefix(operator, operand.kind(), line))
            }
        };
        Ok(ControlFlow::Normal(value))
    }

    pub(crate) fn evaluate_infix(
        &self,
        left: Object,
        operator: InfixOp,
        right: Object,
        line: usize,
    ) -> RuntimeResult<ControlFlow> {
        let value = match (&left, &right) {
            (Object::Number(a), Object::Number(b)) => eval_number_infix(*a, operator, *b),
            (Object::String(a), Object::String(b)) => eval_string_infix(a, operator, b),
            (Object::Boolean(a), Object::Boolean(b)) => eval_equality(a == b, operator),
            (Object::Null, Object::Null) => eval_equality(true, operator),
            _ if left.kind() != right.kind() => {
                return self.fail(RuntimeError::type_mismatch(
                    left.kind(),
                    operator,
                    right.kind(),
                    line,
                ))
            }
            _ => None,
        };

        match value {
            Some(value) => Ok(ControlFlow::Normal(value)),
            None => self.fail(RuntimeError::unknown_infix(
                left.kind(),
                operator,
                right.kind(),
                line,
            )),
        }
    }

    /// `and` / `or`: the right operand is only evaluated when the left one
    /// does not decide the result.
    pub(crate) fn evaluate_logical(
        &mut self,
        left: &Expr,
        operator: LogicalOp,
        right: &Expr,
    ) -> RuntimeResult<ControlFlow> {
        let left = value!(self.evaluate(left)).is_truthy();

        let result = match (operator, left) {
            (LogicalOp::And, false) => false,
            (LogicalOp::Or, true) => true,
            _ => value!(self.evaluate(right)).is_truthy(),
        };

        Ok(ControlFlow::Normal(Object::Boolean(result)))
    }
}

fn eval_number_infix(a: f64, operator: InfixOp, b: f64) -> Option<Object> {
    let value = match operator {
        InfixOp::Add => Object::Number(a + b),
        InfixOp::Subtract => Object::Number(a - b),
        InfixOp::Multiply => Object::Number(a * b),
        InfixOp::Divide => Object::Number(a / b),
        InfixOp::Less => Object::Boolean(a < b),
        InfixOp::LessEqual => Object::Boolean(a <= b),
        InfixOp::Greater => Object::Boolean(a > b),
        InfixOp::GreaterEqual => Object::Boolean(a >= b),
        InfixOp::Equal => Object::Boolean(a == b),
        InfixOp::NotEqual => Object::Boolean(a != b),
    };
    Some(value)
}

fn eval_string_infix(a: &str, operator: InfixOp, b: &str) -> Option<Object> {
    match operator {
        InfixOp::Add => {
            let mut joined = String::with_capacity(a.len() + b.len());
            joined.push_str(a);
            joined.push_str(b);
            Some(Object::String(joined))
        }
        _ => eval_equality(a == b, operator),
    }
}

/// `==` and `!=` given whether the operands are equal; other operators are
/// unsupported.
fn eval_equality(equal: bool, operator: InfixOp) -> Option<Object> {
    match operator {
        InfixOp::Equal => Some(Object::Boolean(equal)),
        InfixOp::NotEqual => Some(Object::Boolean(!equal)),
        _ => None,
    }
}
