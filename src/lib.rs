//! Monlox: a small dynamically-typed scripting language.
//!
//! This is the library root that exports all modules.
//!
//! Source text flows through the [`lexer`], the [`parser`] and finally the
//! tree-walking [`interpreter`]. Runtime failures are ordinary values
//! ([`Object::Error`]); lexing and parsing failures are reported as
//! [`MonloxError`].

#![allow(clippy::new_without_default)]
#![allow(clippy::result_large_err)]

pub mod ast;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod logging;
pub mod parser;
pub mod repl;
pub mod span;

use std::path::Path;

pub use error::MonloxError;
pub use interpreter::{eval, Environment, Interpreter, Object};

/// Parse source code into an AST without executing.
pub fn parse(source: &str) -> Result<ast::Program, MonloxError> {
    let tokens = lexer::Scanner::new(source).scan_tokens()?;
    tracing::debug!(tokens = tokens.len(), "lexed source");

    let program = parser::Parser::new(tokens).parse()?;
    tracing::debug!(statements = program.statements.len(), "parsed program");
    Ok(program)
}

/// Evaluate source code in a fresh global scope.
///
/// A runtime failure is returned as `Ok(Object::Error(..))`, the way a
/// program observes it.
pub fn eval_source(source: &str) -> Result<Object, MonloxError> {
    let program = parse(source)?;
    let result = Interpreter::new().eval(&program);
    tracing::debug!(kind = %result.kind(), "evaluated program");
    Ok(result)
}

/// Run source code, treating a runtime failure as an error.
pub fn run_source(source: &str) -> Result<Object, MonloxError> {
    let program = parse(source)?;
    let result = Interpreter::new().interpret(&program)?;
    tracing::debug!(kind = %result.kind(), "program finished");
    Ok(result)
}

/// Run a Monlox program from a file path.
pub fn run_file(path: &Path) -> Result<Object, MonloxError> {
    tracing::debug!(path = %path.display(), "reading script");
    let source = std::fs::read_to_string(path)?;
    run_source(&source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_eval_source() {
        assert_eq!(
            eval_source("let a = [1, 2]; len(a)").unwrap(),
            Object::Number(2.0)
        );
    }

    #[test]
    fn test_runtime_failures_are_values() {
        let result = eval_source("1 + true").unwrap();
        assert_eq!(
            result.to_string(),
            "ERROR on line 1: type mismatch: NUMBER + BOOLEAN"
        );
    }

    #[test]
    fn test_run_source_reports_runtime_errors() {
        match run_source("let x = 1;\nx()") {
            Err(MonloxError::Runtime(error)) => {
                assert_eq!(error.to_string(), "on line 2: not a function: NUMBER")
            }
            other => panic!("Expected runtime error, got {:?}", other),
        }
    }

    #[test]
    fn test_syntax_errors() {
        assert!(matches!(eval_source("let = 1"), Err(MonloxError::Parser(_))));
        assert!(matches!(eval_source("\"open"), Err(MonloxError::Lexer(_))));
    }

    #[test]
    fn test_run_missing_file() {
        let result = run_file(Path::new("/definitely/not/here.mlx"));
        assert!(matches!(result, Err(MonloxError::Io(_))));
    }
}
