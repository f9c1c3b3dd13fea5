//! Runtime environment for variable scopes.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::interpreter::value::Object;

/// A runtime environment containing variable bindings.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    values: HashMap<String, Object>,
    enclosing: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
            enclosing: None,
        }
    }

    pub fn with_enclosing(enclosing: Rc<RefCell<Environment>>) -> Self {
        Self {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    /// Get a variable's value, searching up the scope chain.
    pub fn get(&self, name: &str) -> Option<Object> {
        if let Some(value) = self.values.get(name) {
            return Some(value.clone());
        }
        if let Some(ref enclosing) = self.enclosing {
            return enclosing.borrow().get(name);
        }
        None
    }

    /// Bind a name in the current scope only. An outer binding with the same
    /// name is shadowed, never modified.
    pub fn set(&mut self, name: impl Into<String>, value: Object) -> Object {
        self.values.insert(name.into(), value.clone());
        value
    }

    /// Names bound in the current scope, sorted (for REPL introspection).
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.values.keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_get_searches_outward() {
        let outer = Rc::new(RefCell::new(Environment::new()));
        outer.borrow_mut().set("a", Object::Number(1.0));

        let inner = Environment::with_enclosing(outer.clone());
        assert_eq!(inner.get("a"), Some(Object::Number(1.0)));
        assert_eq!(inner.get("b"), None);
        assert!(!inner.names().contains(&"a".to_string()));
    }

    #[test]
    fn test_set_shadows_outer_binding() {
        let outer = Rc::new(RefCell::new(Environment::new()));
        outer.borrow_mut().set("a", Object::Number(1.0));

        let mut inner = Environment::with_enclosing(outer.clone());
        inner.set("a", Object::Number(2.0));

        assert_eq!(inner.get("a"), Some(Object::Number(2.0)));
        assert_eq!(outer.borrow().get("a"), Some(Object::Number(1.0)));
    }

    #[test]
    fn test_set_overwrites_local_binding() {
        let mut env = Environment::new();
        env.set("x", Object::Boolean(true));
        let stored = env.set("x", Object::Null);

        assert_eq!(stored, Object::Null);
        assert_eq!(env.get("x"), Some(Object::Null));
    }

    #[test]
    fn test_names_are_local_and_sorted() {
        let outer = Rc::new(RefCell::new(Environment::new()));
        outer.borrow_mut().set("outer", Object::Null);

        let mut inner = Environment::with_enclosing(outer);
        inner.set("zeta", Object::Null);
        inner.set("alpha", Object::Null);

        assert_eq!(inner.names(), vec!["alpha", "zeta"]);
    }
}
