//! Number and string literal readers.

use crate::ast::{AstNode, Span};
use crate::errors::{ErrorKind, ErrorReporting, QuillError};
use crate::syntax::cursor::Cursor;
use crate::syntax::parser::Parser;

// ============================================================================
// NUMBERS
// ============================================================================

pub fn number_applicable(cursor: &Cursor<'_>) -> bool {
    cursor.peek().is_some_and(|c| c.is_ascii_digit())
}

/// Reads `digits` or `digits.digits`.
///
/// A `.` only belongs to the number when a digit follows it, so `1..5` and
/// `1.x` leave the dot for the operator reader.
pub fn parse_number(parser: &mut Parser<'_>) -> Result<AstNode, QuillError> {
    let start = parser.position();
    let cursor = parser.cursor_mut();
    cursor.eat_while(|c| c.is_ascii_digit());
    if cursor.peek() == Some('.') && cursor.peek_second().is_some_and(|c| c.is_ascii_digit()) {
        cursor.bump();
        cursor.eat_while(|c| c.is_ascii_digit());
    }
    let span = parser.cursor().span_from(start);
    let text = &parser.cursor().source()[span.start..span.end];
    let value = text.parse::<f64>().map_err(|_| {
        parser.report(
            ErrorKind::InvalidLiteral {
                literal_type: "number".into(),
                value: text.into(),
            },
            span,
        )
    })?;
    Ok(AstNode::number(value, span))
}

// ============================================================================
// STRINGS
// ============================================================================

pub fn string_applicable(cursor: &Cursor<'_>) -> bool {
    matches!(cursor.peek(), Some('"') | Some('\''))
}

/// Reads a single- or double-quoted string with backslash escapes.
pub fn parse_string(parser: &mut Parser<'_>) -> Result<AstNode, QuillError> {
    let start = parser.position();
    let quote = parser.cursor_mut().bump();
    let mut content = String::new();

    loop {
        match parser.cursor_mut().bump() {
            None => return Err(unterminated(parser, start)),
            Some(ch) if Some(ch) == quote => break,
            Some('\\') => match parser.cursor_mut().bump() {
                Some('n') => content.push('\n'),
                Some('t') => content.push('\t'),
                Some('r') => content.push('\r'),
                Some('0') => content.push('\0'),
                Some('\\') => content.push('\\'),
                Some('"') => content.push('"'),
                Some('\'') => content.push('\''),
                Some(other) => {
                    content.push('\\');
                    content.push(other);
                }
                None => return Err(unterminated(parser, start)),
            },
            Some(ch) => content.push(ch),
        }
    }

    Ok(AstNode::string(content, parser.cursor().span_from(start)))
}

fn unterminated(parser: &Parser<'_>, start: usize) -> QuillError {
    parser
        .report(ErrorKind::UnterminatedString, Span::new(start, start + 1))
        .with_help("add the closing quote")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Expr;
    use crate::syntax::grammar::GrammarTables;

    fn number(src: &str) -> (f64, String) {
        let mut parser = Parser::new(src, GrammarTables::standard());
        let node = parse_number(&mut parser).unwrap();
        match node.value {
            Expr::Number { value } => (value, parser.remaining().to_string()),
            other => panic!("expected number, got {:?}", other),
        }
    }

    fn string(src: &str) -> Result<(String, String), QuillError> {
        let mut parser = Parser::new(src, GrammarTables::standard());
        let node = parse_string(&mut parser)?;
        match node.value {
            Expr::String { value } => Ok((value, parser.remaining().to_string())),
            other => panic!("expected string, got {:?}", other),
        }
    }

    #[test]
    fn test_integer_and_fraction() {
        assert_eq!(number("42"), (42.0, String::new()));
        assert_eq!(number("3.25+1"), (3.25, "+1".into()));
    }

    #[test]
    fn test_dot_without_digit_is_left_alone() {
        assert_eq!(number("1..5"), (1.0, "..5".into()));
        assert_eq!(number("7.x"), (7.0, ".x".into()));
    }

    #[test]
    fn test_string_escapes() {
        let (value, rest) = string(r#""a\"b\n\q" tail"#).unwrap();
        assert_eq!(value, "a\"b\n\\q");
        assert_eq!(rest, " tail");
    }

    #[test]
    fn test_single_quotes_keep_double_quotes() {
        let (value, _) = string(r#"'say "hi"'"#).unwrap();
        assert_eq!(value, "say \"hi\"");
    }

    #[test]
    fn test_unterminated_string_points_at_quote() {
        let err = string("\"abc").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnterminatedString);
        assert_eq!(err.span(), Span::new(0, 1));
    }
}
