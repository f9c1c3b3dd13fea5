//! Hash literal evaluation.

use std::rc::Rc;

use indexmap::IndexMap;

use crate::ast::Expr;
use crate::error::RuntimeError;
use crate::interpreter::executor::{ControlFlow, Interpreter, RuntimeResult};
use crate::interpreter::value::{HashKey, HashPair, Object};

impl Interpreter {
    /// Evaluate a hash literal. Pairs are evaluated in source order, key
    /// before value; a repeated key keeps its first position and the last
    /// value.
    pub(crate) fn evaluate_hash(&mut self, pairs: &[(Expr, Expr)]) -> RuntimeResult<ControlFlow> {
        let mut map = IndexMap::with_capacity(pairs.len());

        for (key_expr, value_expr) in pairs {
            let key = value!(self.evaluate(key_expr));
            let hash_key = match HashKey::from_object(&key) {
                Some(hash_key) => hash_key,
                None => {
                    return self.fail(RuntimeError::unusable_hash_key(
                        key.kind(),
                        key_expr.line(),
                    ))
                }
            };
            let value = value!(self.evaluate(value_expr));
            map.insert(hash_key, HashPair { key, value });
        }

        Ok(ControlFlow::Normal(Object::Hash(Rc::new(map))))
    }
}
