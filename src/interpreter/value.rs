//! Runtime values for the Monlox interpreter.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use ordered_float::OrderedFloat;

use crate::ast::FunctionLiteral;
use crate::error::RuntimeError;
use crate::interpreter::environment::Environment;

/// Signature shared by every builtin: the line of the call site and the
/// evaluated arguments.
pub type BuiltinFn = fn(usize, Vec<Object>) -> Result<Object, RuntimeError>;

/// The type tag of a runtime value, as it appears in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Number,
    Boolean,
    String,
    Null,
    Array,
    Hash,
    Function,
    Builtin,
    Error,
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ObjectType::Number => "NUMBER",
            ObjectType::Boolean => "BOOLEAN",
            ObjectType::String => "STRING",
            ObjectType::Null => "NULL",
            ObjectType::Array => "ARRAY",
            ObjectType::Hash => "HASH",
            ObjectType::Function => "FUNCTION",
            ObjectType::Builtin => "BUILTIN",
            ObjectType::Error => "ERROR",
        };
        write!(f, "{}", name)
    }
}

/// A hashable key type for use in IndexMap.
/// Only numbers, booleans and strings can key a hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HashKey {
    Number(OrderedFloat<f64>),
    Boolean(bool),
    String(String),
}

impl HashKey {
    /// Convert an Object to a HashKey if its kind is hashable.
    pub fn from_object(object: &Object) -> Option<HashKey> {
        match object {
            // -0.0 and 0.0 are one key
            Object::Number(n) if *n == 0.0 => Some(HashKey::Number(OrderedFloat(0.0))),
            Object::Number(n) => Some(HashKey::Number(OrderedFloat(*n))),
            Object::Boolean(b) => Some(HashKey::Boolean(*b)),
            Object::String(s) => Some(HashKey::String(s.clone())),
            _ => None,
        }
    }
}

/// A stored hash entry. The original key object is kept for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct HashPair {
    pub key: Object,
    pub value: Object,
}

/// A runtime value in Monlox.
#[derive(Debug, Clone)]
pub enum Object {
    /// Double-precision number
    Number(f64),
    /// Boolean value
    Boolean(bool),
    /// String value
    String(String),
    /// Null value
    Null,
    /// Immutable array; builtins that "modify" return a new one
    Array(Rc<Vec<Object>>),
    /// Immutable hash, ordered by first insertion
    Hash(Rc<IndexMap<HashKey, HashPair>>),
    /// User function (closure)
    Function(Rc<Function>),
    /// Native function from the builtin table
    Builtin(Builtin),
    /// Runtime error surfaced as a value
    Error(RuntimeError),
}

impl Object {
    pub fn kind(&self) -> ObjectType {
        match self {
            Object::Number(_) => ObjectType::Number,
            Object::Boolean(_) => ObjectType::Boolean,
            Object::String(_) => ObjectType::String,
            Object::Null => ObjectType::Null,
            Object::Array(_) => ObjectType::Array,
            Object::Hash(_) => ObjectType::Hash,
            Object::Function(_) => ObjectType::Function,
            Object::Builtin(_) => ObjectType::Builtin,
            Object::Error(_) => ObjectType::Error,
        }
    }

    /// Only `false` and `null` are falsy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Object::Boolean(false) | Object::Null)
    }

    pub fn array(elements: Vec<Object>) -> Object {
        Object::Array(Rc::new(elements))
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Object::Number(a), Object::Number(b)) => a == b,
            (Object::Boolean(a), Object::Boolean(b)) => a == b,
            (Object::String(a), Object::String(b)) => a == b,
            (Object::Null, Object::Null) => true,
            (Object::Array(a), Object::Array(b)) => a == b,
            (Object::Hash(a), Object::Hash(b)) => a == b,
            (Object::Function(a), Object::Function(b)) => Rc::ptr_eq(a, b),
            (Object::Builtin(a), Object::Builtin(b)) => a.name == b.name,
            (Object::Error(a), Object::Error(b)) => a == b,
            _ => false,
        }
    }
}

impl From<RuntimeError> for Object {
    fn from(error: RuntimeError) -> Self {
        Object::Error(error)
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Number(n) => write_number(f, *n),
            Object::Boolean(b) => write!(f, "{}", b),
            Object::String(s) => write!(f, "{}", s),
            Object::Null => write!(f, "null"),
            Object::Array(elements) => {
                write!(f, "[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                write!(f, "]")
            }
            Object::Hash(pairs) => {
                write!(f, "{{")?;
                for (i, pair) in pairs.values().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", pair.key, pair.value)?;
                }
                write!(f, "}}")
            }
            Object::Function(func) => write!(f, "{}", func),
            Object::Builtin(_) => write!(f, "builtin function"),
            Object::Error(error) => write!(f, "ERROR {}", error),
        }
    }
}

/// Shortest round-trip digits, switching to exponent form (`1e+06`,
/// `1.5e-07`) when the decimal exponent is below -4 or at least 6.
fn write_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_nan() {
        return write!(f, "NaN");
    }
    if n.is_infinite() {
        return write!(f, "{}", if n > 0.0 { "+Inf" } else { "-Inf" });
    }

    let scientific = format!("{:e}", n);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => return write!(f, "{}", n),
    };

    if (-4..6).contains(&exponent) {
        write!(f, "{}", n)
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        write!(f, "{}e{}{:02}", mantissa, sign, exponent.abs())
    }
}

/// A user-defined function together with the scope it was created in.
pub struct Function {
    pub literal: Rc<FunctionLiteral>,
    pub env: Rc<RefCell<Environment>>,
}

impl Function {
    pub fn new(literal: Rc<FunctionLiteral>, env: Rc<RefCell<Environment>>) -> Self {
        Self { literal, env }
    }

    pub fn arity(&self) -> usize {
        self.literal.parameters.len()
    }
}

// The captured environment usually contains the function itself, so Debug
// stops at the literal.
impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<&str> = self
            .literal
            .parameters
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        write!(f, "Function({})", params.join(", "))
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<String> = self
            .literal
            .parameters
            .iter()
            .map(|p| p.to_string())
            .collect();
        write!(f, "fn({}) {{\n{}\n}}", params.join(", "), self.literal.body)
    }
}

/// A native function registered under a fixed name.
#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

impl Builtin {
    pub fn new(name: &'static str, func: BuiltinFn) -> Self {
        Self { name, func }
    }

    pub fn call(&self, line: usize, args: Vec<Object>) -> Result<Object, RuntimeError> {
        (self.func)(line, args)
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Builtin({})", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Block, Identifier};
    use crate::span::Span;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn string(s: &str) -> Object {
        Object::String(s.to_string())
    }

    #[test]
    fn test_string_hash_keys() {
        let hello1 = HashKey::from_object(&string("Hello World"));
        let hello2 = HashKey::from_object(&string("Hello World"));
        let diff1 = HashKey::from_object(&string("My name is johnny"));
        let diff2 = HashKey::from_object(&string("My name is johnny"));

        assert_eq!(hello1, hello2);
        assert_eq!(diff1, diff2);
        assert!(hello1 != diff1);
    }

    #[test]
    fn test_number_and_boolean_hash_keys() {
        assert_eq!(
            HashKey::from_object(&Object::Number(1.0)),
            HashKey::from_object(&Object::Number(1.0))
        );
        assert!(
            HashKey::from_object(&Object::Number(1.0))
                != HashKey::from_object(&Object::Boolean(true))
        );
        assert!(
            HashKey::from_object(&Object::Number(1.0)) != HashKey::from_object(&string("1"))
        );
        assert_eq!(
            HashKey::from_object(&Object::Boolean(false)),
            Some(HashKey::Boolean(false))
        );
    }

    #[test]
    fn test_zero_and_negative_zero_share_a_key() {
        let mut keys = HashSet::new();
        keys.insert(HashKey::from_object(&Object::Number(0.0)));
        keys.insert(HashKey::from_object(&Object::Number(-0.0)));
        assert_eq!(keys.len(), 1);
    }

    #[test]
    fn test_unhashable_kinds() {
        assert_eq!(HashKey::from_object(&Object::Null), None);
        assert_eq!(HashKey::from_object(&Object::array(vec![])), None);
        assert_eq!(
            HashKey::from_object(&Object::Hash(Rc::new(IndexMap::new()))),
            None
        );
    }

    #[test]
    fn test_truthiness() {
        assert!(!Object::Boolean(false).is_truthy());
        assert!(!Object::Null.is_truthy());
        assert!(Object::Boolean(true).is_truthy());
        assert!(Object::Number(0.0).is_truthy());
        assert!(string("").is_truthy());
        assert!(Object::array(vec![]).is_truthy());
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Object::Number(1.0).kind().to_string(), "NUMBER");
        assert_eq!(Object::Boolean(true).kind().to_string(), "BOOLEAN");
        assert_eq!(string("x").kind().to_string(), "STRING");
        assert_eq!(Object::Null.kind().to_string(), "NULL");
        assert_eq!(Object::array(vec![]).kind().to_string(), "ARRAY");
        assert_eq!(
            Object::Hash(Rc::new(IndexMap::new())).kind().to_string(),
            "HASH"
        );
    }

    #[test]
    fn test_number_display() {
        let cases = [
            (0.0, "0"),
            (832040.0, "832040"),
            (1e6, "1e+06"),
            (1e24, "1e+24"),
            (-2.5e10, "-2.5e+10"),
            (0.0001, "0.0001"),
            (0.00001234, "1.234e-05"),
            (1e-100, "1e-100"),
            (f64::INFINITY, "+Inf"),
            (f64::NEG_INFINITY, "-Inf"),
            (f64::NAN, "NaN"),
        ];
        for (n, expected) in cases {
            assert_eq!(Object::Number(n).to_string(), expected);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Object::Number(21.0).to_string(), "21");
        assert_eq!(Object::Number(10.45).to_string(), "10.45");
        assert_eq!(Object::Number(-0.5).to_string(), "-0.5");
        assert_eq!(Object::Null.to_string(), "null");
        assert_eq!(string("hi").to_string(), "hi");
        assert_eq!(
            Object::array(vec![Object::Number(1.0), string("a"), Object::Boolean(true)])
                .to_string(),
            "[1, a, true]"
        );

        let mut pairs = IndexMap::new();
        for (key, value) in [(string("b"), 2.0), (string("a"), 1.0)] {
            pairs.insert(
                HashKey::from_object(&key).unwrap(),
                HashPair {
                    key,
                    value: Object::Number(value),
                },
            );
        }
        assert_eq!(Object::Hash(Rc::new(pairs)).to_string(), "{b: 2, a: 1}");
    }

    #[test]
    fn test_error_display() {
        let error = RuntimeError::identifier_not_found("foobar", 3);
        assert_eq!(
            Object::Error(error).to_string(),
            "ERROR on line 3: identifier not found: foobar"
        );
    }

    #[test]
    fn test_function_display() {
        let span = Span::default();
        let literal = FunctionLiteral {
            parameters: vec![Identifier::new("x", span), Identifier::new("y", span)],
            body: Block::new(vec![], span),
        };
        let function = Function::new(
            Rc::new(literal),
            Rc::new(RefCell::new(Environment::new())),
        );
        assert_eq!(function.arity(), 2);
        assert_eq!(function.to_string(), "fn(x, y) {\n\n}");
    }
}
