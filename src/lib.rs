//! Quill: a table-driven expression front-end.
//!
//! Source text goes in, a spanned [`ast::AstNode`] tree comes out. Operator
//! precedence, associativity and the set of operator symbols come from
//! [`syntax::GrammarTables`], which can be loaded from configuration.
//!
//! ```rust
//! let tree = quill::parse("a - b - c").unwrap();
//! assert_eq!(tree.value.pretty(), "(- (- a b) c)");
//! ```

pub mod ast;
pub mod cli;
pub mod config;
pub mod errors;
pub mod repl;
pub mod syntax;
pub mod validation;

// Re-exports for concise imports
pub use ast::{AstNode, Expr, Span, Spanned};
pub use config::ParserConfig;
pub use errors::{ErrorCategory, ErrorKind, QuillError};
pub use syntax::{parse, parse_with, GrammarTables, Parser};
