//! Interpreter module for Monlox.

pub mod builtins;
pub mod environment;
pub mod executor;
pub mod value;

pub use environment::Environment;
pub use executor::{eval, Interpreter};
pub use value::{Builtin, Function, HashKey, HashPair, Object, ObjectType};
