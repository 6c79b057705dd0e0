//! Quill REPL (Read-Parse-Print Loop)
//!
//! Provides an interactive shell that prints the tree of every expression
//! entered.

use std::io::{self, BufRead, Write};

use crate::config::ParserConfig;
use crate::errors::{print_error, QuillError};
use crate::syntax::parse_with;

/// Config plus the counter that names each entry `<repl:N>`.
pub struct ReplState {
    config: ParserConfig,
    line_number: usize,
}

impl ReplState {
    pub fn new(config: ParserConfig) -> Self {
        Self {
            config,
            line_number: 1,
        }
    }

    /// Parses one complete input and returns its s-expression rendering.
    pub fn parse_line(&mut self, input: &str) -> Result<String, QuillError> {
        let source_name = format!("<repl:{}>", self.line_number);
        self.line_number += 1;
        parse_with(input, &self.config, &source_name).map(|node| node.value.pretty())
    }
}

/// Reads expressions from stdin until `:quit` or end of input.
pub fn run_repl(config: ParserConfig) {
    println!("Quill REPL v{}", env!("CARGO_PKG_VERSION"));
    println!("Type :help for help, :quit to exit");
    println!();

    let mut state = ReplState::new(config);
    let mut input_buffer = String::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        if input_buffer.is_empty() {
            print!("quill> ");
        } else {
            print!("    -> ");
        }
        let _ = io::stdout().flush();

        let line = match lines.next() {
            None => {
                // EOF (Ctrl+D)
                println!("\nGoodbye!");
                break;
            }
            Some(Err(e)) => {
                eprintln!("Error reading input: {}", e);
                break;
            }
            Some(Ok(line)) => line,
        };
        let line = line.trim();

        if input_buffer.is_empty() && line.starts_with(':') {
            match handle_repl_command(line, &state) {
                ReplCommand::Continue => continue,
                ReplCommand::Quit => break,
            }
        }

        if !input_buffer.is_empty() {
            input_buffer.push(' ');
        }
        input_buffer.push_str(line);

        // An empty line forces an incomplete buffer through so its error shows.
        if is_complete_expression(&input_buffer) || line.is_empty() {
            if !input_buffer.trim().is_empty() {
                match state.parse_line(&input_buffer) {
                    Ok(tree) => println!("{tree}"),
                    Err(e) => print_error(e),
                }
            }
            input_buffer.clear();
        }
    }
}

enum ReplCommand {
    Continue,
    Quit,
}

fn handle_repl_command(command: &str, state: &ReplState) -> ReplCommand {
    match command.to_ascii_lowercase().as_str() {
        ":help" | ":h" => {
            println!("Quill REPL Commands:");
            println!("  :help, :h      Show this help");
            println!("  :quit, :q      Exit the REPL");
            println!("  :grammar, :g   Show the active grammar tables");
            println!();
            println!("Enter an expression to see its tree.");
            println!("Unbalanced parentheses or quotes continue on the next line.");
            ReplCommand::Continue
        }
        ":quit" | ":q" => {
            println!("Goodbye!");
            ReplCommand::Quit
        }
        ":grammar" | ":g" => {
            println!("{}", state.config.grammar.render_yaml().trim_end());
            ReplCommand::Continue
        }
        _ => {
            println!(
                "Unknown command: {}. Type :help for available commands.",
                command
            );
            ReplCommand::Continue
        }
    }
}

/// Balanced parentheses and no open string literal.
fn is_complete_expression(input: &str) -> bool {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return false;
    }

    let mut depth = 0i32;
    let mut open_quote: Option<char> = None;
    let mut escape_next = false;

    for ch in trimmed.chars() {
        if escape_next {
            escape_next = false;
            continue;
        }
        match (open_quote, ch) {
            (Some(_), '\\') => escape_next = true,
            (Some(quote), c) if c == quote => open_quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => open_quote = Some(ch),
            (None, '(') => depth += 1,
            (None, ')') => depth -= 1,
            (None, _) => {}
        }
    }

    depth <= 0 && open_quote.is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_complete_expression() {
        assert!(is_complete_expression("42"));
        assert!(is_complete_expression("f(a, g(b))"));
        assert!(is_complete_expression("\"a ( b\""));
        assert!(is_complete_expression("'it\\'s'"));

        assert!(!is_complete_expression("f(a,"));
        assert!(!is_complete_expression("\"unclosed string"));
        assert!(!is_complete_expression("'it\"s"));
        assert!(!is_complete_expression(""));
    }

    #[test]
    fn test_parse_line_numbers_sources() {
        let mut state = ReplState::new(ParserConfig::default());
        assert_eq!(state.parse_line("a * b + c").unwrap(), "(+ (* a b) c)");
        let err = state.parse_line("a +").unwrap_err();
        assert_eq!(err.source_info.source.name(), "<repl:2>");
    }
}
