//! Line-based interactive REPL.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use colored::Colorize;

use crate::error::MonloxError;
use crate::interpreter::{builtins, Interpreter, Object};

const HISTORY_FILE: &str = ".monlox_history";
const PROMPT: &str = ">> ";
const CONTINUATION_PROMPT: &str = ".. ";

/// What the input loop should do after a dot-command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Continue,
    Exit,
}

pub struct Repl {
    interpreter: Interpreter,
    history: Vec<String>,
    history_file: PathBuf,
    multiline_buffer: String,
    balance: i32,
}

impl Repl {
    pub fn new() -> Self {
        let history_file = Self::get_history_path();
        let mut repl = Self {
            interpreter: Interpreter::new(),
            history: Vec::new(),
            history_file,
            multiline_buffer: String::new(),
            balance: 0,
        };
        repl.load_history();
        repl
    }

    fn get_history_path() -> PathBuf {
        if let Some(home) = dirs::home_dir() {
            home.join(HISTORY_FILE)
        } else {
            PathBuf::from(HISTORY_FILE)
        }
    }

    fn load_history(&mut self) {
        if let Ok(content) = std::fs::read_to_string(&self.history_file) {
            for line in content.lines() {
                if !line.trim().is_empty() {
                    self.history.push(line.to_string());
                }
            }
        }
    }

    fn save_history(&self) {
        if let Some(parent) = self.history_file.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let content = self.history.join("\n");
        if let Err(e) = std::fs::write(&self.history_file, content) {
            tracing::debug!(error = %e, path = %self.history_file.display(), "could not save history");
        }
    }

    pub fn run(&mut self) {
        println!("Monlox REPL");
        println!("Type .help for available commands.\n");

        let stdin = io::stdin();
        let mut input = stdin.lock();

        loop {
            print!("{}", self.prompt());
            let _ = io::stdout().flush();

            let mut line = String::new();
            match input.read_line(&mut line) {
                Ok(0) => {
                    self.save_history();
                    println!();
                    break;
                }
                Ok(_) => {
                    let line = line.trim_end();

                    if self.multiline_buffer.is_empty() {
                        if line.trim().is_empty() {
                            continue;
                        }
                        if line.starts_with('.') {
                            if self.handle_command(line.trim()) == CommandOutcome::Exit {
                                self.save_history();
                                break;
                            }
                            continue;
                        }
                    }

                    if let Some(code) = self.feed_line(line) {
                        self.history.push(code.replace('\n', " "));
                        self.execute_and_print(&code);
                    }
                }
                Err(e) => {
                    eprintln!("{}", format!("Error: {}", e).red());
                    self.save_history();
                    break;
                }
            }
        }
    }

    fn prompt(&self) -> &'static str {
        if self.multiline_buffer.is_empty() {
            PROMPT
        } else {
            CONTINUATION_PROMPT
        }
    }

    /// Accumulate a line of input. Returns the complete source once every
    /// opened brace, bracket and parenthesis has been closed.
    pub fn feed_line(&mut self, line: &str) -> Option<String> {
        if !self.multiline_buffer.is_empty() {
            self.multiline_buffer.push('\n');
        }
        self.multiline_buffer.push_str(line);
        self.balance += count_balance(line);

        if self.balance > 0 {
            return None;
        }

        self.balance = 0;
        Some(std::mem::take(&mut self.multiline_buffer))
    }

    /// Evaluate source in the session's global scope.
    pub fn execute(&mut self, source: &str) -> Result<Object, MonloxError> {
        let program = crate::parse(source)?;
        Ok(self.interpreter.eval(&program))
    }

    fn execute_and_print(&mut self, source: &str) {
        match self.execute(source) {
            Ok(Object::Error(error)) => println!("{}", format!("ERROR {}", error).red()),
            Ok(Object::Null) => {}
            Ok(value) => println!("{}", value),
            Err(e) => println!("{}", e.to_string().red()),
        }
    }

    /// Run a dot-command.
    pub fn handle_command(&mut self, line: &str) -> CommandOutcome {
        match line {
            ".help" => self.cmd_help(),
            ".env" => self.cmd_env(),
            ".history" => self.cmd_history(),
            ".clear" => self.cmd_clear(),
            ".exit" | ".quit" => return CommandOutcome::Exit,
            _ => println!(
                "Unknown command: {}. Type .help for available commands.",
                line
            ),
        }
        CommandOutcome::Continue
    }

    fn cmd_help(&self) {
        println!();
        println!("Monlox REPL Commands");
        println!();
        println!(".help     - Show this help message");
        println!(".env      - List bindings in the global scope");
        println!(".history  - Show command history");
        println!(".clear    - Start over with an empty global scope");
        println!(".exit     - Exit the REPL (or Ctrl+D)");
        println!();
        println!("Builtins: {}", builtins::names().collect::<Vec<_>>().join(", "));
        println!();
    }

    fn cmd_env(&self) {
        let env = self.interpreter.global_env();
        let names = env.borrow().names();
        if names.is_empty() {
            println!("No variables defined.");
            return;
        }
        for name in names {
            if let Some(value) = env.borrow().get(&name) {
                println!("  {} = {}", name.cyan(), value);
            }
        }
    }

    fn cmd_history(&self) {
        println!("History:");
        for (i, entry) in self.history.iter().enumerate() {
            println!("{:4}  {}", i + 1, entry);
        }
    }

    fn cmd_clear(&mut self) {
        self.interpreter = Interpreter::new();
        self.multiline_buffer.clear();
        self.balance = 0;
        println!("Environment reset.");
    }
}

impl Default for Repl {
    fn default() -> Self {
        Self::new()
    }
}

/// Count the delimiter balance of a line: +1 for `{ [ (`, -1 for `} ] )`.
/// Delimiters inside string literals and `//` comments are ignored.
pub fn count_balance(s: &str) -> i32 {
    let mut balance = 0;
    let mut in_string = false;
    let mut escaped = false;
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '/' if chars.peek() == Some(&'/') => break,
            '{' | '[' | '(' => balance += 1,
            '}' | ']' | ')' => balance -= 1,
            _ => {}
        }
    }

    balance
}

pub fn run_repl() {
    let mut repl = Repl::new();
    repl.run();
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn repl() -> Repl {
        Repl {
            interpreter: Interpreter::new(),
            history: Vec::new(),
            history_file: PathBuf::from(HISTORY_FILE),
            multiline_buffer: String::new(),
            balance: 0,
        }
    }

    #[test]
    fn test_count_balance() {
        assert_eq!(count_balance("let f = fn(x) {"), 1);
        assert_eq!(count_balance("}"), -1);
        assert_eq!(count_balance("[1, [2,"), 2);
        assert_eq!(count_balance("\"{ not a brace\""), 0);
        assert_eq!(count_balance("\"esc \\\" {\" {"), 1);
        assert_eq!(count_balance("1 // {"), 0);
    }

    #[test]
    fn test_feed_line_waits_for_closing_brace() {
        let mut repl = repl();
        assert_eq!(repl.feed_line("let f = fn(x) {"), None);
        assert_eq!(repl.prompt(), CONTINUATION_PROMPT);
        assert_eq!(repl.feed_line("  x * 2"), None);
        assert_eq!(
            repl.feed_line("};"),
            Some("let f = fn(x) {\n  x * 2\n};".to_string())
        );
        assert_eq!(repl.prompt(), PROMPT);
    }

    #[test]
    fn test_bindings_persist_between_inputs() {
        let mut repl = repl();
        assert_eq!(repl.execute("let a = 20;").unwrap(), Object::Null);
        assert_eq!(repl.execute("a + 1").unwrap(), Object::Number(21.0));
    }

    #[test]
    fn test_clear_resets_global_scope() {
        let mut repl = repl();
        repl.execute("let a = 1;").unwrap();
        assert_eq!(repl.handle_command(".clear"), CommandOutcome::Continue);
        assert!(matches!(repl.execute("a").unwrap(), Object::Error(_)));
    }

    #[test]
    fn test_exit_command() {
        let mut repl = repl();
        assert_eq!(repl.handle_command(".exit"), CommandOutcome::Exit);
    }
}
