//! Interpreter benchmarks for Monlox.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use monlox::interpreter::Interpreter;
use monlox::lexer::Scanner;
use monlox::parser::Parser;
use std::fs;

/// Run a Monlox program from source code.
fn run_program(source: &str) {
    let tokens = Scanner::new(source).scan_tokens().expect("lexer error");
    let mut parser = Parser::new(tokens);
    let program = parser.parse().expect("parser error");

    let mut interpreter = Interpreter::new();
    interpreter.interpret(&program).expect("runtime error");
}

fn load_program(name: &str) -> String {
    let path = format!("benches/programs/{}.mlx", name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {}: {}", path, e))
}

fn program_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("programs");

    for name in ["fib_recursive", "closures", "array_ops", "hash_ops"] {
        let source = load_program(name);
        group.bench_with_input(BenchmarkId::new("run", name), &source, |b, src| {
            b.iter(|| run_program(black_box(src)))
        });
    }

    group.finish();
}

/// Benchmark parsing only (no execution).
fn parsing_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    let source = load_program("array_ops");

    group.bench_function("parse_array_program", |b| {
        b.iter(|| {
            let tokens = Scanner::new(black_box(&source)).scan_tokens().unwrap();
            let mut parser = Parser::new(tokens);
            parser.parse().unwrap()
        })
    });

    group.finish();
}

/// Parameterized fibonacci benchmark for different N values.
fn fibonacci_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("fib_scaling");

    for n in [10, 15, 20].iter() {
        let source = format!(
            r#"
let fib = fn(n) {{
  if (n < 2) {{ return n; }}
  fib(n - 1) + fib(n - 2)
}};
fib({});
"#,
            n
        );

        group.bench_with_input(BenchmarkId::new("recursive", n), &source, |b, src| {
            b.iter(|| run_program(black_box(src)))
        });
    }

    group.finish();
}

criterion_group!(benches, program_benchmarks, parsing_benchmarks, fibonacci_scaling);

criterion_main!(benches);
