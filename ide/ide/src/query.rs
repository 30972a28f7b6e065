//! Position queries.

use arbor_ast::{
    node::{Node, NodeRef},
    nodes::{NodeKind, SourcePosition},
    visitor::{Visitor, walk_children},
};
use serde::Serialize;
use tracing::trace;

/// Finds the innermost node whose span contains `position`.
struct Locator {
    position: SourcePosition,
    found: Option<NodeRef>,
}

impl Visitor for Locator {
    fn unhandled(&mut self, node: &NodeRef) {
        let location = node.location();
        if location.is_unknown() {
            // Synthesized nodes have no span; their children may.
            walk_children(self, node);
            return;
        }
        if !location.contains(self.position) {
            return;
        }
        self.found = Some(node.clone());
        walk_children(self, node);
    }
}

/// The smallest node under `root` enclosing `position`, if any.
#[must_use]
pub fn node_at(root: &NodeRef, position: SourcePosition) -> Option<NodeRef> {
    let mut locator = Locator {
        position,
        found: None,
    };
    root.accept(&mut locator);
    trace!(
        %position,
        found = ?locator.found.as_ref().map(|node| node.kind()),
        "node_at"
    );
    locator.found
}

/// The nearest `Block` at or above `node`.
#[must_use]
pub fn enclosing_scope(node: &NodeRef) -> Option<NodeRef> {
    if node.kind() == NodeKind::Block {
        return Some(node.clone());
    }
    node.ancestors()
        .into_iter()
        .find(|ancestor| ancestor.kind() == NodeKind::Block)
}

/// The lexical scope that applies at `position`.
#[must_use]
pub fn scope_at(root: &NodeRef, position: SourcePosition) -> Option<NodeRef> {
    node_at(root, position).and_then(|node| enclosing_scope(&node))
}

/// Kinds from the root down to `node`, inclusive.
#[must_use]
pub fn ancestry(node: &Node) -> Vec<NodeKind> {
    let mut kinds: Vec<NodeKind> = node
        .ancestors()
        .iter()
        .map(|ancestor| ancestor.kind())
        .collect();
    kinds.reverse();
    kinds.push(node.kind());
    kinds
}

/// What an editor needs to render a node: hover text, outline entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeSummary {
    pub kind: &'static str,
    pub file_name: String,
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
}

impl From<&Node> for NodeSummary {
    fn from(node: &Node) -> Self {
        let location = node.location();
        Self {
            kind: node.kind().name(),
            file_name: location.file_name,
            start_line: location.start_line,
            start_column: location.start_column,
            end_line: location.end_line,
            end_column: location.end_column,
            documentation: node.documentation(),
        }
    }
}
