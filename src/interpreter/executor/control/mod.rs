//! Control-flow expressions.

mod conditionals;
mod lambdas;
