//! The grammar-rule dispatch table.
//!
//! Every reader exposes the same two operations: a side-effect free
//! `applicable` probe and a `parse` that may only run when the probe holds.
//! Readers reach each other through [`Rule`] rather than calling one another
//! directly, which is what lets the value, operator and call readers recurse
//! into each other.

use tracing::trace;

use crate::ast::AstNode;
use crate::errors::{ErrorReporting, QuillError};
use crate::syntax::parser::Parser;
use crate::syntax::{identifier, literal, operator, value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// A full expression: unary and binary operators over values.
    Expression,
    /// One atomic value, possibly a call.
    Value,
    Identifier,
    Number,
    String,
}

/// Atomic value rules in dispatch order. At most one applies at any position.
pub const VALUE_RULES: [Rule; 3] = [Rule::Identifier, Rule::Number, Rule::String];

impl Rule {
    pub const fn name(self) -> &'static str {
        match self {
            Rule::Expression => "expression",
            Rule::Value => "value",
            Rule::Identifier => "identifier",
            Rule::Number => "number",
            Rule::String => "string",
        }
    }

    /// Could this rule start parsing at the current position?
    pub fn applicable(self, parser: &Parser<'_>) -> bool {
        let cursor = parser.cursor();
        match self {
            Rule::Expression => operator::applicable(cursor, parser.grammar()),
            Rule::Value => value::applicable(parser),
            Rule::Identifier => identifier::applicable(cursor),
            Rule::Number => literal::number_applicable(cursor),
            Rule::String => literal::string_applicable(cursor),
        }
    }

    /// Parses this rule at the current position.
    ///
    /// Calling this where [`Rule::applicable`] is false is a bug in the caller
    /// and yields a `PreconditionViolation` error.
    pub fn parse(self, parser: &mut Parser<'_>) -> Result<AstNode, QuillError> {
        if !self.applicable(parser) {
            let span = parser.cursor().next_char_span();
            return Err(parser.precondition_violation(self.name(), span));
        }
        trace!(rule = self.name(), position = parser.position(), "dispatch");
        match self {
            Rule::Expression => operator::parse(parser),
            Rule::Value => value::parse(parser),
            Rule::Identifier => identifier::parse(parser),
            Rule::Number => literal::parse_number(parser),
            Rule::String => literal::parse_string(parser),
        }
    }
}
