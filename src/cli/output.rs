//! Handles all user-facing output for the CLI.
//!
//! Tree rendering lives here together with the coloured status lines, so
//! every command reports in the same way.

use std::io::Write;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::ast::AstNode;
use crate::cli::args::TreeFormat;
use crate::validation::ValidationResult;

// ============================================================================
// TREE RENDERING
// ============================================================================

/// Renders a tree in the requested format.
pub fn render_tree(node: &AstNode, format: TreeFormat) -> String {
    match format {
        TreeFormat::Sexpr => node.value.pretty(),
        TreeFormat::Json => serde_json::to_string_pretty(node)
            .unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}")),
        TreeFormat::Yaml => {
            serde_yaml::to_string(node).unwrap_or_else(|e| format!("# unrenderable tree: {e}"))
        }
        TreeFormat::Debug => format!("{node:#?}"),
    }
}

// ============================================================================
// STATUS LINES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Failed,
    Warning,
}

impl Status {
    fn color(self) -> Color {
        match self {
            Status::Ok => Color::Green,
            Status::Failed => Color::Red,
            Status::Warning => Color::Yellow,
        }
    }

    fn mark(self) -> &'static str {
        match self {
            Status::Ok => "✓",
            Status::Failed => "✗",
            Status::Warning => "!",
        }
    }
}

/// Prints `mark message` with the mark coloured when stdout is a terminal.
pub fn print_status(status: Status, message: &str) {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(status.color())).set_bold(true));
    let _ = write!(stdout, "{}", status.mark());
    let _ = stdout.reset();
    let _ = writeln!(stdout, " {message}");
}

/// Prints the closing summary of a `check` run.
pub fn print_check_summary(files: usize, passed: usize, failed: usize) {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let _ = stdout.set_color(ColorSpec::new().set_bold(true));
    let _ = writeln!(stdout, "\nCheck Summary");
    let _ = stdout.reset();
    let _ = writeln!(stdout, "═════════════");
    let _ = writeln!(stdout, "Files:       {files}");
    if passed > 0 {
        let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)));
        let _ = writeln!(stdout, "Parsed:      {passed} expressions");
    }
    if failed > 0 {
        let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)));
        let _ = writeln!(stdout, "Failed:      {failed} expressions");
    }
    let _ = stdout.reset();
}

/// Prints grammar validation findings; errors first.
pub fn print_validation(result: &ValidationResult) {
    for error in &result.errors {
        print_status(Status::Failed, error);
    }
    for warning in &result.warnings {
        print_status(Status::Warning, warning);
    }
    if result.is_valid() {
        print_status(Status::Ok, "Grammar validation passed");
    } else {
        print_status(
            Status::Failed,
            &format!("Grammar validation failed with {} error(s)", result.errors.len()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse;

    #[test]
    fn test_render_sexpr() {
        let node = parse("f(a) * 2").unwrap();
        assert_eq!(render_tree(&node, TreeFormat::Sexpr), "(* (call f a) 2)");
    }

    #[test]
    fn test_render_json_is_tagged() {
        let node = parse("x").unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&render_tree(&node, TreeFormat::Json)).unwrap();
        assert_eq!(json["value"]["kind"], "identifier");
        assert_eq!(json["value"]["name"], "x");
        assert_eq!(json["span"]["end"], 1);
    }

    #[test]
    fn test_render_yaml_names_operator() {
        let node = parse("a + b").unwrap();
        let yaml = render_tree(&node, TreeFormat::Yaml);
        assert!(yaml.contains("kind: operation"));
        assert!(yaml.contains("name: a"));
    }
}
