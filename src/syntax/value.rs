//! "Any value" reader: identifiers, literals and calls.

use crate::ast::AstNode;
use crate::errors::{ErrorReporting, QuillError};
use crate::syntax::call;
use crate::syntax::parser::Parser;
use crate::syntax::rules::{Rule, VALUE_RULES};

pub fn applicable(parser: &Parser<'_>) -> bool {
    VALUE_RULES.iter().any(|rule| rule.applicable(parser))
}

/// Parses the first applicable value rule. An identifier directly followed by
/// `(` is read as the callee of a call.
pub fn parse(parser: &mut Parser<'_>) -> Result<AstNode, QuillError> {
    let Some(rule) = VALUE_RULES.into_iter().find(|rule| rule.applicable(parser)) else {
        let span = parser.cursor().next_char_span();
        return Err(parser.precondition_violation(Rule::Value.name(), span));
    };

    let node = rule.parse(parser)?;
    if rule == Rule::Identifier && call::applicable(parser.cursor()) {
        return call::parse(parser, node);
    }
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::grammar::GrammarTables;

    fn value(src: &str) -> (String, String) {
        let mut parser = Parser::new(src, GrammarTables::standard());
        let node = parse(&mut parser).unwrap();
        (node.value.pretty(), parser.remaining().to_string())
    }

    #[test]
    fn test_dispatches_each_kind() {
        assert_eq!(value("name + 1"), ("name".into(), " + 1".into()));
        assert_eq!(value("12 * x"), ("12".into(), " * x".into()));
        assert_eq!(value("\"s\" & t"), ("\"s\"".into(), " & t".into()));
    }

    #[test]
    fn test_identifier_then_paren_is_call() {
        assert_eq!(value("f(a, b) + c"), ("(call f a b)".into(), " + c".into()));
    }

    #[test]
    fn test_space_before_paren_is_not_call() {
        assert_eq!(value("f (a)"), ("f".into(), " (a)".into()));
    }

    #[test]
    fn test_number_then_paren_is_not_call() {
        assert_eq!(value("3(a)"), ("3".into(), "(a)".into()));
    }
}
