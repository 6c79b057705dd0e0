//! Quill Error Handling - Unified Encapsulated API
//!
//! Every failure of the front-end is a [`QuillError`]: what went wrong
//! ([`ErrorKind`]), where ([`SourceInfo`]) and how to help ([`DiagnosticInfo`]).
//! Errors render through `miette`.

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceSpan};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::ast::Span;

// ============================================================================
// SOURCE CONTEXT - Error reporting infrastructure
// ============================================================================

/// Named source text that diagnostics point into.
#[derive(Debug, Clone)]
pub struct SourceContext {
    pub name: String,
    pub content: String,
}

impl SourceContext {
    pub fn from_file(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Stands in for files whose text could not be used; the snippet shows
    /// only the path.
    pub fn unread(name: &str) -> Self {
        Self {
            name: name.to_string(),
            content: name.to_string(),
        }
    }

    pub fn to_named_source(&self) -> Arc<NamedSource<String>> {
        Arc::new(NamedSource::new(self.name.clone(), self.content.clone()))
    }
}

// ============================================================================
// ERROR TYPES
// ============================================================================

/// The single error type
#[derive(Debug)]
pub struct QuillError {
    /// What went wrong
    pub kind: ErrorKind,
    /// Where it happened
    pub source_info: SourceInfo,
    /// How to help
    pub diagnostic_info: DiagnosticInfo,
}

/// All error kinds as a clean enum
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErrorKind {
    // Parse errors - malformed input
    #[error("Parse error: expected a value, found {found}")]
    ExpectedValue { found: String },
    #[error("Parse error: operator '{operator}' has no right-hand operand")]
    MissingOperand { operator: String },
    #[error("Parse error: call to '{callee}' is missing its closing ')'")]
    UnclosedCall { callee: String },
    #[error("Parse error: unterminated string literal")]
    UnterminatedString,
    #[error("Parse error: invalid {literal_type} '{value}'")]
    InvalidLiteral { literal_type: String, value: String },
    #[error("Parse error: expected {expected}, found {found}")]
    UnexpectedCharacter { expected: String, found: String },
    #[error("Parse error: missing {element}")]
    MissingElement { element: String },
    #[error("Parse error: unexpected trailing input {found}")]
    TrailingInput { found: String },
    #[error("Parse error: expression exceeds the parser recursion limit of {limit}")]
    NestingLimit { limit: usize },

    // Grammar and configuration errors
    #[error("Grammar error: {message}")]
    InvalidGrammar { message: String },
    #[error("Configuration error: cannot load '{path}': {message}")]
    ConfigLoad { path: String, message: String },

    // Input that could not be read at all
    #[error("I/O error: cannot read '{path}': {message}")]
    ReadFailed { path: String, message: String },

    // Internal errors - bugs in the grammar dispatch, not user input
    #[error("Internal error: rule '{rule}' was asked to parse where it does not apply")]
    PreconditionViolation { rule: String },
}

/// Where an error happened
#[derive(Debug, Clone)]
pub struct SourceInfo {
    pub source: Arc<NamedSource<String>>,
    pub primary_span: SourceSpan,
    pub phase: String,
}

#[derive(Debug, Clone)]
pub struct DiagnosticInfo {
    pub help: Option<String>,
    pub error_code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Parse,
    Grammar,
    Io,
    Internal,
}

impl ErrorKind {
    /// Coarse grouping used by the CLI and by tests.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ExpectedValue { .. }
            | Self::MissingOperand { .. }
            | Self::UnclosedCall { .. }
            | Self::UnterminatedString
            | Self::InvalidLiteral { .. }
            | Self::UnexpectedCharacter { .. }
            | Self::MissingElement { .. }
            | Self::TrailingInput { .. }
            | Self::NestingLimit { .. } => ErrorCategory::Parse,

            Self::InvalidGrammar { .. } | Self::ConfigLoad { .. } => ErrorCategory::Grammar,

            Self::ReadFailed { .. } => ErrorCategory::Io,

            Self::PreconditionViolation { .. } => ErrorCategory::Internal,
        }
    }

    /// Last segment of the `quill::<phase>::<suffix>` code.
    pub const fn code_suffix(&self) -> &'static str {
        match self {
            Self::ExpectedValue { .. } => "expected_value",
            Self::MissingOperand { .. } => "missing_operand",
            Self::UnclosedCall { .. } => "unclosed_call",
            Self::UnterminatedString => "unterminated_string",
            Self::InvalidLiteral { .. } => "invalid_literal",
            Self::UnexpectedCharacter { .. } => "unexpected_character",
            Self::MissingElement { .. } => "missing_element",
            Self::TrailingInput { .. } => "trailing_input",
            Self::NestingLimit { .. } => "nesting_limit",
            Self::InvalidGrammar { .. } => "invalid_grammar",
            Self::ConfigLoad { .. } => "config_load",
            Self::ReadFailed { .. } => "read_failed",
            Self::PreconditionViolation { .. } => "precondition_violation",
        }
    }

    fn primary_label(&self) -> &'static str {
        match self {
            Self::ExpectedValue { .. } => "expected a value here",
            Self::MissingOperand { .. } => "operand missing after this operator",
            Self::UnclosedCall { .. } => "call opened here",
            Self::UnterminatedString => "string starts here",
            Self::InvalidLiteral { .. } => "invalid literal",
            Self::UnexpectedCharacter { .. } => "unexpected character",
            Self::MissingElement { .. } => "missing here",
            Self::TrailingInput { .. } => "not part of the expression",
            Self::NestingLimit { .. } => "recursion limit reached here",
            Self::InvalidGrammar { .. } => "invalid grammar",
            Self::ConfigLoad { .. } => "configuration",
            Self::ReadFailed { .. } => "unreadable input",
            Self::PreconditionViolation { .. } => "internal dispatch error",
        }
    }
}

impl QuillError {
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// The primary span as a byte range.
    pub fn span(&self) -> Span {
        let offset = self.source_info.primary_span.offset();
        Span::new(offset, offset + self.source_info.primary_span.len())
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.diagnostic_info.help = Some(help.into());
        self
    }
}

impl std::error::Error for QuillError {}

impl fmt::Display for QuillError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl Diagnostic for QuillError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(&self.diagnostic_info.error_code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diagnostic_info
            .help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn fmt::Display + 'a>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = vec![LabeledSpan::new_with_span(
            Some(self.kind.primary_label().to_string()),
            self.source_info.primary_span,
        )];
        Some(Box::new(labels.into_iter()))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&*self.source_info.source)
    }
}

// ============================================================================
// ERROR CONSTRUCTION
// ============================================================================

/// Implemented by anything that owns source text and can point into it.
pub trait ErrorReporting {
    fn report(&self, kind: ErrorKind, span: Span) -> QuillError;

    fn expected_value(&self, found: &str, span: Span) -> QuillError {
        self.report(
            ErrorKind::ExpectedValue {
                found: found.into(),
            },
            span,
        )
    }

    fn missing_operand(&self, operator: &str, span: Span) -> QuillError {
        self.report(
            ErrorKind::MissingOperand {
                operator: operator.into(),
            },
            span,
        )
    }

    fn unexpected_character(&self, expected: &str, found: &str, span: Span) -> QuillError {
        self.report(
            ErrorKind::UnexpectedCharacter {
                expected: expected.into(),
                found: found.into(),
            },
            span,
        )
    }

    fn missing_element(&self, element: &str, span: Span) -> QuillError {
        self.report(
            ErrorKind::MissingElement {
                element: element.into(),
            },
            span,
        )
    }

    /// A reader was invoked where its rule does not apply.
    fn precondition_violation(&self, rule: &str, span: Span) -> QuillError {
        self.report(
            ErrorKind::PreconditionViolation { rule: rule.into() },
            span,
        )
        .with_help("This is an internal parser error. Please report this as a bug.")
    }
}

pub(crate) fn build_error(
    source: &SourceContext,
    phase: &str,
    kind: ErrorKind,
    span: Span,
) -> QuillError {
    let error_code = format!("quill::{}::{}", phase, kind.code_suffix());
    QuillError {
        kind,
        source_info: SourceInfo {
            source: source.to_named_source(),
            primary_span: span.into(),
            phase: phase.to_string(),
        },
        diagnostic_info: DiagnosticInfo {
            help: None,
            error_code,
        },
    }
}

/// Standalone constructor for grammar validation findings.
///
/// The grammar has no meaningful source span, so the rendered grammar text is
/// attached as the source and the whole of it is labelled.
pub fn grammar_error(message: String, rendered_grammar: &str) -> QuillError {
    let source = SourceContext::from_file("grammar", rendered_grammar);
    build_error(
        &source,
        "grammar",
        ErrorKind::InvalidGrammar { message },
        Span::new(0, rendered_grammar.len()),
    )
}

/// Error for a configuration file that cannot be read or deserialized.
pub fn config_error(path: &str, message: impl Into<String>) -> QuillError {
    let source = SourceContext::unread(path);
    build_error(
        &source,
        "config",
        ErrorKind::ConfigLoad {
            path: path.to_string(),
            message: message.into(),
        },
        Span::new(0, 0),
    )
}

/// Error for an input file or stream that cannot be read.
pub fn read_error(path: &str, message: impl Into<String>) -> QuillError {
    let source = SourceContext::unread(path);
    build_error(
        &source,
        "io",
        ErrorKind::ReadFailed {
            path: path.to_string(),
            message: message.into(),
        },
        Span::new(0, 0),
    )
}

/// Prints a QuillError with full miette diagnostics
pub fn print_error(error: QuillError) {
    use miette::Report;
    let report = Report::new(error);
    eprintln!("{report:?}");
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestContext(SourceContext);

    impl ErrorReporting for TestContext {
        fn report(&self, kind: ErrorKind, span: Span) -> QuillError {
            build_error(&self.0, "parse", kind, span)
        }
    }

    #[test]
    fn test_error_code_includes_phase_and_suffix() {
        let ctx = TestContext(SourceContext::from_file("t", "a +"));
        let err = ctx.missing_operand("+", Span::new(2, 3));
        assert_eq!(err.diagnostic_info.error_code, "quill::parse::missing_operand");
        assert_eq!(err.category(), ErrorCategory::Parse);
        assert_eq!(err.span(), Span::new(2, 3));
        assert_eq!(
            err.to_string(),
            "Parse error: operator '+' has no right-hand operand"
        );
    }

    #[test]
    fn test_precondition_violation_has_help() {
        let ctx = TestContext(SourceContext::from_file("t", "1"));
        let err = ctx.precondition_violation("identifier", Span::new(0, 1));
        assert_eq!(err.category(), ErrorCategory::Internal);
        assert!(err.diagnostic_info.help.unwrap().contains("report this as a bug"));
    }

    #[test]
    fn test_grammar_error_spans_whole_grammar() {
        let err = grammar_error("duplicate symbol '+'".into(), "groups: []");
        assert_eq!(err.span(), Span::new(0, 10));
        assert_eq!(err.category(), ErrorCategory::Grammar);
    }
}
