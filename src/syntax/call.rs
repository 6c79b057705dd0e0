//! Call argument reader.
//!
//! Arguments are full expressions separated by commas. Whitespace is allowed
//! around arguments and separators; the cursor ends after the closing `)`.

use crate::ast::{AstNode, Span};
use crate::errors::{ErrorKind, ErrorReporting, QuillError};
use crate::syntax::cursor::Cursor;
use crate::syntax::parser::Parser;
use crate::syntax::rules::Rule;

pub fn applicable(cursor: &Cursor<'_>) -> bool {
    cursor.peek() == Some('(')
}

/// Reads `( arg, arg, ... )` after an already parsed callee.
pub fn parse(parser: &mut Parser<'_>, callee: AstNode) -> Result<AstNode, QuillError> {
    if !applicable(parser.cursor()) {
        let span = parser.cursor().next_char_span();
        return Err(parser.precondition_violation("call", span));
    }
    parser.cursor_mut().bump();

    let mut args = Vec::new();
    parser.cursor_mut().skip_whitespace();
    if parser.cursor().peek() == Some(')') {
        parser.cursor_mut().bump();
        let span = Span::new(callee.span.start, parser.position());
        return Ok(AstNode::call(callee, args, span));
    }

    loop {
        parser.cursor_mut().skip_whitespace();
        if !Rule::Expression.applicable(parser) {
            return Err(missing_argument(parser, &callee));
        }
        args.push(Rule::Expression.parse(parser)?);

        parser.cursor_mut().skip_whitespace();
        match parser.cursor().peek() {
            Some(',') => {
                parser.cursor_mut().bump();
            }
            Some(')') => {
                parser.cursor_mut().bump();
                break;
            }
            None => return Err(unclosed(parser, &callee)),
            Some(_) => {
                let span = parser.cursor().next_char_span();
                let found = parser.cursor().describe_next();
                return Err(parser.unexpected_character("',' or ')'", &found, span));
            }
        }
    }

    let span = Span::new(callee.span.start, parser.position());
    Ok(AstNode::call(callee, args, span))
}

fn missing_argument(parser: &Parser<'_>, callee: &AstNode) -> QuillError {
    let span = parser.cursor().next_char_span();
    match parser.cursor().peek() {
        None => unclosed(parser, callee),
        Some(',' | ')') => parser.missing_element("argument", span),
        Some(_) => parser.expected_value(&parser.cursor().describe_next(), span),
    }
}

fn unclosed(parser: &Parser<'_>, callee: &AstNode) -> QuillError {
    parser
        .report(
            ErrorKind::UnclosedCall {
                callee: callee.value.pretty(),
            },
            Span::new(callee.span.start, parser.position()),
        )
        .with_help("add ')' to close the argument list")
}
