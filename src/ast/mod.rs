//! AST module for the Quill expression language
//!
//! This module provides the Abstract Syntax Tree types produced by the
//! expression front-end. Every node carries the byte span it was read from.

// ============================================================================
// IMPORTS
// ============================================================================

use serde::{Deserialize, Serialize};

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// Represents a span in the source code, as byte offsets.
///
/// # Examples
///
/// ```rust
/// use quill::ast::Span;
/// let span = Span::new(0, 5).join(Span::new(8, 9));
/// assert_eq!(span, Span::new(0, 9));
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// Wrapper for carrying source span information with any value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spanned<T> {
    pub value: T,
    pub span: Span,
}

/// Canonical AST node type. Nodes own their children.
pub type AstNode = Spanned<Expr>;

/// The closed set of expression forms.
///
/// # Examples
///
/// ```rust
/// use quill::ast::{AstNode, Span};
/// let node = AstNode::identifier("total", Span::new(0, 5));
/// assert_eq!(node.value.pretty(), "total");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expr {
    Number {
        value: f64,
    },
    String {
        value: String,
    },
    /// Unresolved variable reference.
    Identifier {
        name: String,
    },
    Call {
        callee: Box<AstNode>,
        args: Vec<AstNode>,
    },
    /// Unary (one operand) or binary (two operands, source order) operation.
    Operation {
        op: String,
        operands: Vec<AstNode>,
    },
}

// ============================================================================
// PUBLIC API IMPLEMENTATION
// ============================================================================

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn join(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        miette::SourceSpan::from(span.start..span.end)
    }
}

impl Expr {
    /// Pretty-prints the expression as an S-expression.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use quill::parse;
    /// let node = parse("a + b * c").unwrap();
    /// assert_eq!(node.value.pretty(), "(+ a (* b c))");
    /// let call = parse("f(x, 2)").unwrap();
    /// assert_eq!(call.value.pretty(), "(call f x 2)");
    /// ```
    pub fn pretty(&self) -> String {
        match self {
            Expr::Number { value } => value.to_string(),
            Expr::String { value } => format!("{:?}", value),
            Expr::Identifier { name } => name.clone(),
            Expr::Call { callee, args } => {
                let mut parts = vec!["call".to_string(), callee.value.pretty()];
                parts.extend(args.iter().map(|a| a.value.pretty()));
                format!("({})", parts.join(" "))
            }
            Expr::Operation { op, operands } => {
                let mut parts = vec![op.clone()];
                parts.extend(operands.iter().map(|o| o.value.pretty()));
                format!("({})", parts.join(" "))
            }
        }
    }

    /// Short human-readable name of the node kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Number { .. } => "number",
            Expr::String { .. } => "string",
            Expr::Identifier { .. } => "identifier",
            Expr::Call { .. } => "call",
            Expr::Operation { operands, .. } if operands.len() == 1 => "unary operation",
            Expr::Operation { .. } => "binary operation",
        }
    }
}

impl Spanned<Expr> {
    pub fn number(value: f64, span: Span) -> Self {
        Spanned {
            value: Expr::Number { value },
            span,
        }
    }

    pub fn string(value: impl Into<String>, span: Span) -> Self {
        Spanned {
            value: Expr::String {
                value: value.into(),
            },
            span,
        }
    }

    pub fn identifier(name: impl Into<String>, span: Span) -> Self {
        Spanned {
            value: Expr::Identifier { name: name.into() },
            span,
        }
    }

    pub fn call(callee: AstNode, args: Vec<AstNode>, span: Span) -> Self {
        Spanned {
            value: Expr::Call {
                callee: Box::new(callee),
                args,
            },
            span,
        }
    }

    pub fn operation(op: impl Into<String>, operands: Vec<AstNode>, span: Span) -> Self {
        Spanned {
            value: Expr::Operation {
                op: op.into(),
                operands,
            },
            span,
        }
    }

    /// Operator symbol and operand count, if this node is an operation.
    pub fn operator(&self) -> Option<(&str, usize)> {
        match &self.value {
            Expr::Operation { op, operands } => Some((op.as_str(), operands.len())),
            _ => None,
        }
    }

    /// Leaf nodes (literals, identifiers and calls) in left-to-right order.
    ///
    /// Calls are leaves: their arguments are separate expressions.
    pub fn leaves(&self) -> Vec<&AstNode> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a AstNode>) {
        match &self.value {
            Expr::Operation { operands, .. } => {
                for operand in operands {
                    operand.collect_leaves(out);
                }
            }
            _ => out.push(self),
        }
    }
}
