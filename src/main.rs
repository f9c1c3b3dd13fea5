//! Monlox CLI: Execute files, evaluate snippets or run the REPL.

use std::env;
use std::path::Path;
use std::process;

use colored::Colorize;
use monlox::{MonloxError, Object};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI command to execute.
#[derive(Debug, PartialEq)]
enum Command {
    /// Run a script file
    Run { file: String },
    /// Evaluate a string
    Eval { code: String },
    /// Start the REPL
    Repl,
    /// Print usage
    Help,
    /// Print the version
    Version,
}

/// CLI options parsed from arguments.
#[derive(Debug, PartialEq)]
struct Options {
    command: Command,
    color: bool,
    log_filter: Option<String>,
}

fn print_usage() {
    eprintln!("Monlox {} - Monlox Interpreter", VERSION);
    eprintln!();
    eprintln!("Usage: monlox [options] [script.mlx]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -e <code>         Evaluate code and print result");
    eprintln!("  --log <filter>    Enable diagnostic logs (e.g. monlox=debug)");
    eprintln!("  --no-color        Disable colored output");
    eprintln!("  --version, -V     Print version");
    eprintln!("  --help, -h        Show this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  monlox                        Start interactive REPL");
    eprintln!("  monlox script.mlx             Run a script file");
    eprintln!("  monlox -e 'len([1, 2, 3])'    Evaluate code directly");
}

/// Parse command-line arguments. `Err` holds a usage error message.
fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options {
        command: Command::Repl,
        color: env::var_os("NO_COLOR").is_none(),
        log_filter: None,
    };

    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];
        match arg.as_str() {
            "--help" | "-h" => options.command = Command::Help,
            "--version" | "-V" => options.command = Command::Version,
            "--no-color" => options.color = false,
            "-e" => {
                i += 1;
                let code = args
                    .get(i)
                    .ok_or("-e requires a code argument")?;
                options.command = Command::Eval { code: code.clone() };
            }
            "--log" => {
                i += 1;
                let filter = args
                    .get(i)
                    .ok_or("--log requires a filter")?;
                options.log_filter = Some(filter.clone());
            }
            _ if arg.starts_with("--log=") => {
                options.log_filter = Some(arg["--log=".len()..].to_string());
            }
            _ if arg.starts_with('-') => {
                return Err(format!("Unknown option: {}", arg));
            }
            _ => {
                if !matches!(options.command, Command::Repl) {
                    return Err("Only one script file can be specified".into());
                }
                options.command = Command::Run { file: arg.clone() };
            }
        }
        i += 1;
    }

    Ok(options)
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{}", message);
            print_usage();
            process::exit(64);
        }
    };

    if !options.color {
        colored::control::set_override(false);
    }
    monlox::logging::init_tracing(options.log_filter.as_deref());

    match &options.command {
        Command::Repl => monlox::repl::run_repl(),
        Command::Run { file } => run_file(file),
        Command::Eval { code } => run_eval(code),
        Command::Help => print_usage(),
        Command::Version => println!("monlox {}", VERSION),
    }
}

fn run_file(path: &str) {
    if let Err(e) = monlox::run_file(Path::new(path)) {
        exit_with(e);
    }
}

fn run_eval(code: &str) {
    match monlox::run_source(code) {
        Ok(Object::Null) => {}
        Ok(value) => println!("{}", value),
        Err(e) => exit_with(e),
    }
}

fn exit_with(error: MonloxError) -> ! {
    eprintln!("{}", error.to_string().red());
    process::exit(exit_code(&error));
}

fn exit_code(error: &MonloxError) -> i32 {
    match error {
        MonloxError::Lexer(_) | MonloxError::Parser(_) => 65,
        MonloxError::Runtime(_) => 70,
        MonloxError::Io(_) => 74,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_arguments_starts_repl() {
        let options = parse_args(&[]).unwrap();
        assert_eq!(options.command, Command::Repl);
        assert_eq!(options.log_filter, None);
    }

    #[test]
    fn test_script_and_flags() {
        let options = parse_args(&args(&["--no-color", "--log", "monlox=trace", "a.mlx"])).unwrap();
        assert_eq!(
            options,
            Options {
                command: Command::Run {
                    file: "a.mlx".into()
                },
                color: false,
                log_filter: Some("monlox=trace".into()),
            }
        );
    }

    #[test]
    fn test_eval_flag() {
        let options = parse_args(&args(&["-e", "1 + 1", "--log=debug"])).unwrap();
        assert_eq!(
            options.command,
            Command::Eval {
                code: "1 + 1".into()
            }
        );
        assert_eq!(options.log_filter, Some("debug".into()));
    }

    #[test]
    fn test_usage_errors() {
        assert_eq!(
            parse_args(&args(&["-e"])),
            Err("-e requires a code argument".to_string())
        );
        assert_eq!(
            parse_args(&args(&["--bogus"])),
            Err("Unknown option: --bogus".to_string())
        );
        assert!(parse_args(&args(&["a.mlx", "b.mlx"])).is_err());
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse_args(&args(&["-h"])).unwrap().command, Command::Help);
        assert_eq!(
            parse_args(&args(&["--version"])).unwrap().command,
            Command::Version
        );
    }

    #[test]
    fn test_exit_codes() {
        let syntax = monlox::run_source("let = 1").unwrap_err();
        assert_eq!(exit_code(&syntax), 65);
        let runtime = monlox::run_source("1 + true").unwrap_err();
        assert_eq!(exit_code(&runtime), 70);
        let io = monlox::run_file(Path::new("/no/such/file.mlx")).unwrap_err();
        assert_eq!(exit_code(&io), 74);
    }
}
