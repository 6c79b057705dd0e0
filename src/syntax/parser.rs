//! Quill Parser - owns the cursor, the grammar tables and the nesting budget.
//!
//! The readers in this module tree do the actual work; the parser is the state
//! they share and the context that turns failures into diagnostics.

use tracing::debug;

use crate::ast::{AstNode, Span};
use crate::config::ParserConfig;
use crate::errors::{build_error, ErrorKind, ErrorReporting, QuillError, SourceContext};
use crate::syntax::cursor::Cursor;
use crate::syntax::grammar::GrammarTables;
use crate::syntax::rules::Rule;

/// Recursion budget of the operator reader before `NestingLimit` is reported.
///
/// The reader recurses once per unary prefix and once per infix operator, so
/// a flat chain of `n` operands uses `n` levels even though the finished tree
/// is rotated into a different shape.
pub const DEFAULT_MAX_DEPTH: usize = 256;

const DEFAULT_SOURCE_NAME: &str = "<input>";

// ============================================================================
// PUBLIC API
// ============================================================================

/// Parses `source` as exactly one expression with the standard grammar.
pub fn parse(source: &str) -> Result<AstNode, QuillError> {
    let mut parser = Parser::new(source, GrammarTables::standard());
    parse_complete(&mut parser)
}

/// Parses `source` as exactly one expression with a configured grammar.
pub fn parse_with(
    source: &str,
    config: &ParserConfig,
    source_name: &str,
) -> Result<AstNode, QuillError> {
    let mut parser = Parser::new(source, &config.grammar)
        .with_source_name(source_name)
        .with_max_depth(config.max_depth);
    parse_complete(&mut parser)
}

fn parse_complete(parser: &mut Parser<'_>) -> Result<AstNode, QuillError> {
    let node = parser.parse_expression()?;
    parser.finish()?;
    Ok(node)
}

// ============================================================================
// PARSER STATE
// ============================================================================

pub struct Parser<'a> {
    cursor: Cursor<'a>,
    grammar: &'a GrammarTables,
    source: SourceContext,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, grammar: &'a GrammarTables) -> Self {
        Self {
            cursor: Cursor::new(source),
            grammar,
            source: SourceContext::from_file(DEFAULT_SOURCE_NAME, source),
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source.name = name.into();
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn grammar(&self) -> &'a GrammarTables {
        self.grammar
    }

    pub fn cursor(&self) -> &Cursor<'a> {
        &self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut Cursor<'a> {
        &mut self.cursor
    }

    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    pub fn remaining(&self) -> &'a str {
        self.cursor.remaining()
    }

    /// Parses one expression and leaves the cursor right after it.
    pub fn parse_expression(&mut self) -> Result<AstNode, QuillError> {
        debug!(
            source = %self.source.name,
            position = self.position(),
            "parsing expression"
        );
        if !Rule::Expression.applicable(self) {
            let mut probe = self.cursor.clone();
            probe.skip_whitespace();
            return Err(self.expected_value(&probe.describe_next(), probe.next_char_span()));
        }
        let node = Rule::Expression.parse(self)?;
        debug!(kind = node.value.kind_name(), end = node.span.end, "parsed expression");
        Ok(node)
    }

    /// Succeeds when only whitespace is left.
    pub fn finish(&mut self) -> Result<(), QuillError> {
        self.cursor.skip_whitespace();
        if self.cursor.is_at_end() {
            return Ok(());
        }
        let span = Span::new(self.position(), self.cursor.source().len());
        let found = self.cursor.describe_next();
        Err(self
            .report(ErrorKind::TrailingInput { found }, span)
            .with_help("only one expression is allowed here"))
    }

    /// Counts one level of operator-reader recursion.
    pub(crate) fn enter(&mut self) -> Result<(), QuillError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            self.depth -= 1;
            let span = self.cursor.next_char_span();
            return Err(self
                .report(
                    ErrorKind::NestingLimit {
                        limit: self.max_depth,
                    },
                    span,
                )
                .with_help(
                    "each unary prefix and infix operator uses one level; \
                     raise the limit with --max-depth or `max_depth` in the config",
                ));
        }
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

impl ErrorReporting for Parser<'_> {
    fn report(&self, kind: ErrorKind, span: Span) -> QuillError {
        build_error(&self.source, "parse", kind, span)
    }
}
