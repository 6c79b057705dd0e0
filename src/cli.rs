//! The Quill Command-Line Interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use tracing::{debug, Level};
use walkdir::WalkDir;

use crate::config::ParserConfig;
use crate::errors::{print_error, read_error, QuillError};
use crate::syntax::parse_with;
use crate::validation::validate_tables;

pub mod args;
pub mod output;

use args::{Command, DataFormat, QuillArgs, TreeFormat};
use output::{print_check_summary, print_status, print_validation, render_tree, Status};

/// Extension of expression files picked up by `check`.
pub const SOURCE_EXTENSION: &str = "qx";

// ============================================================================
// MAIN ENTRY POINT
// ============================================================================

/// The main entry point for the CLI.
pub fn run() {
    let args = QuillArgs::parse();
    init_tracing(args.verbose);

    let config = load_config(args.config.as_deref(), args.max_depth).unwrap_or_else(|e| {
        print_error(e);
        process::exit(1);
    });

    let success = match args.command {
        Command::Parse { file, expr, format } => handle_parse(&config, file, expr, format),
        Command::Check { path } => handle_check(&config, &path),
        Command::Grammar { format } => {
            handle_grammar(&config, format);
            true
        }
        Command::ValidateGrammar { file } => handle_validate_grammar(&file),
        Command::Repl => {
            crate::repl::run_repl(config);
            true
        }
    };

    if !success {
        process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn load_config(path: Option<&Path>, max_depth: Option<usize>) -> Result<ParserConfig, QuillError> {
    let config = match path {
        Some(path) => ParserConfig::load(path)?,
        None => ParserConfig::default(),
    };
    Ok(match max_depth {
        Some(depth) => config.with_max_depth(depth),
        None => config,
    })
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn handle_parse(
    config: &ParserConfig,
    file: Option<PathBuf>,
    expr: Option<String>,
    format: TreeFormat,
) -> bool {
    let (source_name, source) = match read_parse_input(file, expr) {
        Ok(input) => input,
        Err(e) => {
            print_error(e);
            return false;
        }
    };

    match parse_with(&source, config, &source_name) {
        Ok(node) => {
            println!("{}", render_tree(&node, format));
            true
        }
        Err(e) => {
            print_error(e);
            false
        }
    }
}

fn read_parse_input(
    file: Option<PathBuf>,
    expr: Option<String>,
) -> Result<(String, String), QuillError> {
    if let Some(expr) = expr {
        return Ok(("<expr>".to_string(), expr));
    }
    if let Some(path) = file {
        let name = path.display().to_string();
        let source = fs::read_to_string(&path).map_err(|e| read_error(&name, e.to_string()))?;
        return Ok((name, source));
    }
    let mut source = String::new();
    io::stdin()
        .read_to_string(&mut source)
        .map_err(|e| read_error("<stdin>", e.to_string()))?;
    Ok(("<stdin>".to_string(), source))
}

/// Parses every expression line of every source file under `path`.
fn handle_check(config: &ParserConfig, path: &Path) -> bool {
    let files = match collect_source_files(path) {
        Ok(files) => files,
        Err(e) => {
            print_error(e);
            return false;
        }
    };
    if files.is_empty() {
        print_status(
            Status::Warning,
            &format!("no .{SOURCE_EXTENSION} files found under {}", path.display()),
        );
    }

    let mut passed = 0;
    let mut failed = 0;
    for file in &files {
        let name = file.display().to_string();
        let text = match fs::read_to_string(file) {
            Ok(text) => text,
            Err(e) => {
                print_error(read_error(&name, e.to_string()));
                failed += 1;
                continue;
            }
        };

        let mut file_failures = 0;
        for (line_number, line) in expression_lines(&text) {
            let source_name = format!("{name}:{line_number}");
            match parse_with(line, config, &source_name) {
                Ok(_) => passed += 1,
                Err(e) => {
                    file_failures += 1;
                    print_error(e);
                }
            }
        }

        failed += file_failures;
        if file_failures == 0 {
            print_status(Status::Ok, &name);
        } else {
            print_status(Status::Failed, &format!("{name} ({file_failures} failed)"));
        }
    }

    print_check_summary(files.len(), passed, failed);
    failed == 0
}

fn collect_source_files(path: &Path) -> Result<Vec<PathBuf>, QuillError> {
    let origin = path.display().to_string();
    let mut files = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry.map_err(|e| read_error(&origin, e.to_string()))?;
        let extension = entry.path().extension().and_then(|ext| ext.to_str());
        if entry.file_type().is_file() && extension == Some(SOURCE_EXTENSION) {
            files.push(entry.into_path());
        }
    }
    debug!(count = files.len(), root = %origin, "collected source files");
    Ok(files)
}

/// Non-blank lines that are not `#` comments, with 1-based line numbers.
fn expression_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line))
        .filter(|(_, line)| {
            let trimmed = line.trim_start();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
}

fn handle_grammar(config: &ParserConfig, format: DataFormat) {
    let rendered = match format {
        DataFormat::Yaml => config.grammar.render_yaml(),
        DataFormat::Json => config.grammar.render_json(),
    };
    println!("{}", rendered.trim_end());
}

fn handle_validate_grammar(file: &Path) -> bool {
    let config = match ParserConfig::load_unchecked(file) {
        Ok(config) => config,
        Err(e) => {
            print_error(e);
            return false;
        }
    };
    let result = validate_tables(&config.grammar);
    print_validation(&result);
    result.is_valid()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expression_lines_skip_blanks_and_comments() {
        let text = "a + b\n\n  # note\nf(x)\n   \n";
        let lines: Vec<_> = expression_lines(text).collect();
        assert_eq!(lines, vec![(1, "a + b"), (4, "f(x)")]);
    }

    #[test]
    fn test_max_depth_override_applies_without_config_file() {
        let config = load_config(None, Some(3)).unwrap();
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.grammar, ParserConfig::default().grammar);
    }
}
