#![warn(clippy::pedantic)]
//! Editor-facing queries over arbor syntax trees.
//!
//! Everything here reads trees through `accept`, field accessors and parent
//! links. Nothing in this crate mutates a tree.

pub mod query;

pub use query::{NodeSummary, ancestry, enclosing_scope, node_at, scope_at};
