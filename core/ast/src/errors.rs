//! Error types for the AST crate.
//!
//! Only contract violations are errors here. A failed structural comparison
//! or a `replace` that finds nothing are ordinary outcomes and are reported
//! through return values instead.

use thiserror::Error;

use crate::nodes::{NodeCategory, NodeKind};

/// Errors raised by tree mutation and typed access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[must_use = "errors must not be silently ignored"]
pub enum AstError {
    /// A node was placed into a slot or collection that cannot hold its kind.
    #[error("cannot place `{found}` into `{slot}`: expected {expected}")]
    IncompatibleNode {
        slot: &'static str,
        expected: NodeCategory,
        found: NodeKind,
    },

    /// A typed view of a node was requested for the wrong kind.
    #[error("expected a `{expected}` node, found `{found}`")]
    UnexpectedKind { expected: NodeKind, found: NodeKind },

    /// A shared base field was addressed on a kind that does not declare it.
    #[error("`{kind}` has no field `{field}`")]
    UnknownField { kind: NodeKind, field: &'static str },

    /// A positional collection operation was given an index past its end.
    #[error("index {index} is out of bounds for `{collection}` of length {len}")]
    IndexOutOfBounds {
        collection: &'static str,
        index: usize,
        len: usize,
    },

    /// A child's parent link does not point at the node that holds it.
    #[error("`{kind}` held by `{holder}` records a different parent")]
    ParentMismatch { kind: NodeKind, holder: NodeKind },
}
