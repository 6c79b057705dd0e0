//! The operator reader: unary prefixes, infix operators and precedence.
//!
//! An expression is read as: an optional unary prefix, else one value; then an
//! optional infix operator followed by the rest of the expression, read
//! recursively. The node built at each level is handed to
//! [`rotation::repair`] before it is returned, which turns the right-leaning
//! recursive shape into one that respects the precedence table.

use crate::ast::{AstNode, Span};
use crate::errors::{ErrorReporting, QuillError};
use crate::syntax::cursor::Cursor;
use crate::syntax::grammar::GrammarTables;
use crate::syntax::parser::Parser;
use crate::syntax::rotation;
use crate::syntax::rules::{Rule, VALUE_RULES};
use crate::syntax::{identifier, literal};

pub fn applicable(cursor: &Cursor<'_>, grammar: &GrammarTables) -> bool {
    let mut probe = cursor.clone();
    probe.skip_whitespace();
    if probe.match_any(&grammar.reserved).is_some() {
        return false;
    }
    probe.match_any(&grammar.unary).is_some() || value_starts_at(&probe)
}

// Mirrors the value rules over a cursor that is not the parser's own.
fn value_starts_at(cursor: &Cursor<'_>) -> bool {
    VALUE_RULES.iter().any(|rule| match rule {
        Rule::Identifier => identifier::applicable(cursor),
        Rule::Number => literal::number_applicable(cursor),
        Rule::String => literal::string_applicable(cursor),
        Rule::Expression | Rule::Value => false,
    })
}

pub fn parse(parser: &mut Parser<'_>) -> Result<AstNode, QuillError> {
    parser.enter()?;
    let result = parse_operation(parser);
    parser.leave();
    result
}

fn parse_operation(parser: &mut Parser<'_>) -> Result<AstNode, QuillError> {
    parser.cursor_mut().skip_whitespace();
    let start = parser.position();
    let grammar = parser.grammar();
    let reserved = parser.cursor().match_any(&grammar.reserved).is_some();

    if let Some(symbol) = parser.cursor().match_any(&grammar.unary).filter(|_| !reserved) {
        parser.cursor_mut().advance(symbol.chars().count());
        let operand = parse_right_operand(parser, symbol, start)?;
        let span = Span::new(start, operand.span.end);
        let node = AstNode::operation(symbol, vec![operand], span);
        return Ok(rotation::repair(node, grammar));
    }

    if reserved || !Rule::Value.applicable(parser) {
        let found = parser.cursor().describe_next();
        return Err(parser.expected_value(&found, parser.cursor().next_char_span()));
    }
    let left = Rule::Value.parse(parser)?;

    let Some(symbol) = probe_infix(parser) else {
        return Ok(left);
    };
    let symbol_start = parser.position();
    parser.cursor_mut().advance(symbol.chars().count());
    let right = parse_right_operand(parser, symbol, symbol_start)?;

    let span = left.span.join(right.span);
    let node = AstNode::operation(symbol, vec![left, right], span);
    Ok(rotation::repair(node, grammar))
}

/// Looks past whitespace for an infix operator. On a miss, including a
/// reserved look-alike, the cursor is put back where the value ended.
fn probe_infix<'g>(parser: &mut Parser<'g>) -> Option<&'g str> {
    let saved = parser.position();
    let grammar = parser.grammar();
    parser.cursor_mut().skip_whitespace();

    let cursor = parser.cursor();
    let symbol = if cursor.match_any(&grammar.reserved).is_some() {
        None
    } else {
        cursor.match_any(&grammar.infix)
    };
    if symbol.is_none() {
        parser.cursor_mut().restore(saved);
    }
    symbol
}

fn parse_right_operand(
    parser: &mut Parser<'_>,
    symbol: &str,
    symbol_start: usize,
) -> Result<AstNode, QuillError> {
    if !Rule::Expression.applicable(parser) {
        let span = Span::new(symbol_start, symbol_start + symbol.len());
        return Err(parser.missing_operand(symbol, span));
    }
    Rule::Expression.parse(parser)
}
