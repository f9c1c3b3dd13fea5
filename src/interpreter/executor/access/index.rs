//! Index access evaluation (array[index], hash[key]).

use crate::error::RuntimeError;
use crate::interpreter::executor::{ControlFlow, Interpreter, RuntimeResult};
use crate::interpreter::value::{HashKey, Object};

impl Interpreter {
    /// Evaluate `left[index]` on already evaluated operands.
    ///
    /// Misses (out of range, fractional or negative array indices, absent
    /// hash keys) produce null rather than an error.
    pub(crate) fn evaluate_index(
        &self,
        left: Object,
        index: Object,
        line: usize,
    ) -> RuntimeResult<ControlFlow> {
        let value = match (&left, &index) {
            (Object::Array(elements), Object::Number(n)) => array_element(elements, *n),
            (Object::Hash(pairs), key) => match HashKey::from_object(key) {
                Some(key) => pairs
                    .get(&key)
                    .map(|pair| pair.value.clone())
                    .unwrap_or(Object::Null),
                None => return self.fail(RuntimeError::unusable_hash_key(key.kind(), line)),
            },
            _ => {
                return self.fail(RuntimeError::index_not_supported(
                    left.kind(),
                    index.kind(),
                    line,
                ))
            }
        };
        Ok(ControlFlow::Normal(value))
    }
}

fn array_element(elements: &[Object], index: f64) -> Object {
    if index < 0.0 || index.fract() != 0.0 || index >= elements.len() as f64 {
        return Object::Null;
    }
    elements[index as usize].clone()
}
