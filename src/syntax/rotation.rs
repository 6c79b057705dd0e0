//! Precedence repair by local tree rotation.
//!
//! The operator reader recurses into the right-hand side before it builds the
//! current node, so `a - b - c` first comes out as `(- a (- b c))`. Repair
//! turns the two-level pattern
//!
//! ```text
//!   outer(l, inner(il, ir))   =>   inner(outer(l, il), ir)
//!   outer(inner(il, ir))      =>   inner(outer(il), ir)        (unary outer)
//! ```
//!
//! whenever the outer operator binds at least as tightly as the inner one.
//! One rotation is not enough for longer chains: after `a - ((b - c) - d)`
//! rotates, the demoted `a - (b - c)` is itself mis-nested. [`repair`]
//! therefore repairs the demoted node again before assembling the new root.

use tracing::trace;

use crate::ast::{AstNode, Expr, Span};
use crate::syntax::grammar::{Associativity, GrammarTables};

/// Whether `node` matches the rotation pattern and the grammar says the outer
/// operator must end up below the inner one.
///
/// Only binary inner operations are rotated into; a unary operand is atomic.
pub fn needs_rotation(node: &AstNode, grammar: &GrammarTables) -> bool {
    let Expr::Operation { op, operands } = &node.value else {
        return false;
    };
    let Some(Expr::Operation {
        op: inner_op,
        operands: inner_operands,
    }) = operands.last().map(|o| &o.value)
    else {
        return false;
    };
    if inner_operands.len() != 2 {
        return false;
    }
    let Some(inner_level) = grammar.precedence_of(inner_op) else {
        return false;
    };

    match operands.len() {
        1 => grammar.unary_binding > inner_level,
        2 => match grammar.precedence_of(op) {
            Some(outer_level) if outer_level > inner_level => true,
            Some(outer_level) if outer_level == inner_level => {
                grammar.associativity_at(outer_level) == Associativity::Left
            }
            _ => false,
        },
        _ => false,
    }
}

/// Performs exactly one rotation if `node` has the two-level shape, without
/// consulting precedence. Returns the node unchanged otherwise.
pub fn rotate(node: AstNode) -> AstNode {
    match split(node) {
        Ok(parts) => parts.assemble(|demoted| demoted),
        Err(node) => node,
    }
}

/// Restores precedence and associativity in a freshly built operation whose
/// operands are already repaired.
pub fn repair(node: AstNode, grammar: &GrammarTables) -> AstNode {
    if !needs_rotation(&node, grammar) {
        return node;
    }
    match split(node) {
        Ok(parts) => {
            trace!(outer = %parts.demoted_op(), inner = %parts.root_op, "rotating");
            parts.assemble(|demoted| repair(demoted, grammar))
        }
        Err(node) => node,
    }
}

/// A rotation taken apart: the outer node already holds the inner node's left
/// operand, the inner operator and right operand wait to become the new root.
struct Split {
    demoted: AstNode,
    root_op: String,
    root_right: AstNode,
}

impl Split {
    fn demoted_op(&self) -> &str {
        self.demoted.operator().map_or("", |(op, _)| op)
    }

    fn assemble(self, fix_demoted: impl FnOnce(AstNode) -> AstNode) -> AstNode {
        let demoted = fix_demoted(self.demoted);
        let span = demoted.span.join(self.root_right.span);
        AstNode::operation(self.root_op, vec![demoted, self.root_right], span)
    }
}

fn split(node: AstNode) -> Result<Split, AstNode> {
    let span = node.span;
    let (op, mut operands) = match node.value {
        Expr::Operation { op, operands } => (op, operands),
        other => return Err(AstNode { value: other, span }),
    };

    let inner = match operands.pop() {
        Some(inner) => inner,
        None => return Err(AstNode::operation(op, operands, span)),
    };
    let inner_span = inner.span;
    let (inner_op, inner_operands) = match inner.value {
        Expr::Operation {
            op: inner_op,
            operands: inner_operands,
        } => (inner_op, inner_operands),
        other => {
            operands.push(AstNode {
                value: other,
                span: inner_span,
            });
            return Err(AstNode::operation(op, operands, span));
        }
    };

    match <[AstNode; 2]>::try_from(inner_operands) {
        Ok([inner_left, inner_right]) => {
            let demoted_span = Span::new(span.start, inner_left.span.end);
            operands.push(inner_left);
            Ok(Split {
                demoted: AstNode::operation(op, operands, demoted_span),
                root_op: inner_op,
                root_right: inner_right,
            })
        }
        Err(inner_operands) => {
            operands.push(AstNode::operation(inner_op, inner_operands, inner_span));
            Err(AstNode::operation(op, operands, span))
        }
    }
}
