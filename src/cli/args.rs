//! Defines the command-line arguments and subcommands for the Quill CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "quill",
    version,
    about = "Parse and inspect Quill expressions."
)]
pub struct QuillArgs {
    /// Parser configuration file (.yaml, .yml or .json).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the parser recursion limit (one level per operator).
    #[arg(long, global = true, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Log more; repeat for trace output.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse one expression and print its tree.
    Parse {
        /// File holding the expression; stdin is read when neither this nor
        /// --expr is given.
        file: Option<PathBuf>,
        /// Expression given on the command line.
        #[arg(short, long, conflicts_with = "file")]
        expr: Option<String>,
        #[arg(long, value_enum, default_value_t = TreeFormat::Sexpr)]
        format: TreeFormat,
    },
    /// Parse every expression line of the .qx files under a path.
    Check {
        #[arg(required = true)]
        path: PathBuf,
    },
    /// Print the active grammar tables.
    Grammar {
        #[arg(long, value_enum, default_value_t = DataFormat::Yaml)]
        format: DataFormat,
    },
    /// Validate a grammar or configuration file.
    ValidateGrammar {
        #[arg(required = true)]
        file: PathBuf,
    },
    /// Start an interactive session.
    Repl,
}

/// How `parse` prints a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TreeFormat {
    Sexpr,
    Json,
    Yaml,
    Debug,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DataFormat {
    Yaml,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_flags_after_subcommand() {
        let args =
            QuillArgs::try_parse_from(["quill", "parse", "-e", "a + b", "-vv", "--max-depth", "9"])
                .unwrap();
        assert_eq!(args.verbose, 2);
        assert_eq!(args.max_depth, Some(9));
        match args.command {
            Command::Parse { expr, format, file } => {
                assert_eq!(expr.as_deref(), Some("a + b"));
                assert_eq!(format, TreeFormat::Sexpr);
                assert!(file.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_file_and_expr_conflict() {
        assert!(QuillArgs::try_parse_from(["quill", "parse", "x.qx", "-e", "a"]).is_err());
    }

    #[test]
    fn test_grammar_format() {
        let args = QuillArgs::try_parse_from(["quill", "grammar", "--format", "json"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Grammar {
                format: DataFormat::Json
            }
        ));
    }
}
