//! Syntax module for the Quill expression language
//!
//! A hand-written recursive-descent front-end. [`rules::Rule`] names every
//! grammar rule; each rule lives in its own reader module and is driven
//! through a shared [`parser::Parser`]. Operator precedence comes from the
//! [`grammar::GrammarTables`] and is restored after the fact by
//! [`rotation::repair`].

pub mod call;
pub mod cursor;
pub mod grammar;
pub mod identifier;
pub mod literal;
pub mod operator;
pub mod parser;
pub mod rotation;
pub mod rules;
pub mod value;

pub use cursor::Cursor;
pub use grammar::{Associativity, GrammarTables, PrecedenceGroup};
pub use parser::{parse, parse_with, Parser, DEFAULT_MAX_DEPTH};
pub use rules::Rule;
