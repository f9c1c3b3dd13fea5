//! Built-in functions for Monlox.
//!
//! The table is fixed: programs cannot add to it, and a `let` binding with
//! a builtin's name shadows the builtin.

use std::io::{self, Write};
use std::rc::Rc;

use crate::error::RuntimeError;
use crate::interpreter::value::{Builtin, BuiltinFn, Object};

const BUILTINS: &[(&str, BuiltinFn)] = &[
    ("len", len),
    ("first", first),
    ("last", last),
    ("rest", rest),
    ("push", push),
    ("puts", puts),
];

/// Find a builtin by name.
pub fn lookup(name: &str) -> Option<Builtin> {
    BUILTINS
        .iter()
        .find(|(builtin, _)| *builtin == name)
        .map(|(name, func)| Builtin::new(*name, *func))
}

/// Names of every builtin, in table order.
pub fn names() -> impl Iterator<Item = &'static str> {
    BUILTINS.iter().map(|(name, _)| *name)
}

fn check_arity(args: &[Object], expected: usize, line: usize) -> Result<(), RuntimeError> {
    if args.len() != expected {
        return Err(RuntimeError::wrong_arity(expected, args.len(), line));
    }
    Ok(())
}

// len(string|array) - character or element count
fn len(line: usize, args: Vec<Object>) -> Result<Object, RuntimeError> {
    check_arity(&args, 1, line)?;
    match &args[0] {
        Object::String(s) => Ok(Object::Number(s.chars().count() as f64)),
        Object::Array(elements) => Ok(Object::Number(elements.len() as f64)),
        other => Err(RuntimeError::invalid_argument(
            format!("argument to `len` not supported. got={}", other.kind()),
            line,
        )),
    }
}

// first(array) - element 0, or null when empty
fn first(line: usize, args: Vec<Object>) -> Result<Object, RuntimeError> {
    check_arity(&args, 1, line)?;
    match &args[0] {
        Object::Array(elements) => Ok(elements.first().cloned().unwrap_or(Object::Null)),
        other => Err(RuntimeError::invalid_argument(
            format!("argument to `first` must be ARRAY, got={}", other.kind()),
            line,
        )),
    }
}

// last(array) - final element, or null when empty
fn last(line: usize, args: Vec<Object>) -> Result<Object, RuntimeError> {
    check_arity(&args, 1, line)?;
    match &args[0] {
        Object::Array(elements) => Ok(elements.last().cloned().unwrap_or(Object::Null)),
        other => Err(RuntimeError::invalid_argument(
            format!("argument to `last` must be ARRAY, got={}", other.kind()),
            line,
        )),
    }
}

// rest(array) - new array without the first element, or null when empty
fn rest(line: usize, args: Vec<Object>) -> Result<Object, RuntimeError> {
    check_arity(&args, 1, line)?;
    match &args[0] {
        Object::Array(elements) if elements.is_empty() => Ok(Object::Null),
        Object::Array(elements) => Ok(Object::array(elements[1..].to_vec())),
        other => Err(RuntimeError::invalid_argument(
            format!("argument to `rest` must be ARRAY, got={}", other.kind()),
            line,
        )),
    }
}

// push(array, value) - new array with value appended; the original is untouched
fn push(line: usize, args: Vec<Object>) -> Result<Object, RuntimeError> {
    check_arity(&args, 2, line)?;
    let mut args = args.into_iter();
    match (args.next(), args.next()) {
        (Some(Object::Array(elements)), Some(value)) => {
            let mut extended = Vec::with_capacity(elements.len() + 1);
            extended.extend(elements.iter().cloned());
            extended.push(value);
            Ok(Object::Array(Rc::new(extended)))
        }
        (Some(other), _) => Err(RuntimeError::invalid_argument(
            format!("first argument to `push` must be ARRAY, got={}", other.kind()),
            line,
        )),
        (None, _) => Err(RuntimeError::wrong_arity(2, 0, line)),
    }
}

// puts(...) - print each argument on its own line
fn puts(_line: usize, args: Vec<Object>) -> Result<Object, RuntimeError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for arg in &args {
        // A closed stdout is not a language-level error.
        let _ = writeln!(out, "{}", arg);
    }
    Ok(Object::Null)
}
