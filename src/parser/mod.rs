//! Parser module for Monlox.

mod core;
mod expressions;
mod precedence;
mod statements;


pub use self::core::Parser;
