//! Call evaluation.

mod function;
