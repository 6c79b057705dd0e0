//! Bare identifier reader.

use crate::ast::AstNode;
use crate::errors::QuillError;
use crate::syntax::cursor::Cursor;
use crate::syntax::parser::Parser;

fn is_identifier_char(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

pub fn applicable(cursor: &Cursor<'_>) -> bool {
    cursor.peek().is_some_and(is_identifier_char)
}

/// Consumes a maximal run of letters and underscores. Digits end the name.
pub fn parse(parser: &mut Parser<'_>) -> Result<AstNode, QuillError> {
    let start = parser.position();
    let name = parser.cursor_mut().eat_while(is_identifier_char);
    Ok(AstNode::identifier(name, parser.cursor().span_from(start)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expr, Span};
    use crate::syntax::grammar::GrammarTables;

    #[test]
    fn test_reads_letters_and_underscores() {
        let mut parser = Parser::new("snake_Case rest", GrammarTables::standard());
        let node = parse(&mut parser).unwrap();
        assert_eq!(
            node.value,
            Expr::Identifier {
                name: "snake_Case".into()
            }
        );
        assert_eq!(node.span, Span::new(0, 10));
        assert_eq!(parser.remaining(), " rest");
    }

    #[test]
    fn test_stops_at_digit() {
        let mut parser = Parser::new("x1", GrammarTables::standard());
        let node = parse(&mut parser).unwrap();
        assert_eq!(node.value.pretty(), "x");
        assert_eq!(parser.remaining(), "1");
    }

    #[test]
    fn test_not_applicable_to_digit() {
        assert!(!applicable(&Cursor::new("9a")));
        assert!(applicable(&Cursor::new("_9")));
    }
}
