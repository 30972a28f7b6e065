//! Traversal on top of [`Node::accept`].
//!
//! [`Visitor`] itself is generated next to the node table. The helpers here
//! are the composite behaviour ("visit all children") that the dispatch
//! deliberately leaves out.

use crate::node::{Node, NodeRef};

pub use crate::nodes::Visitor;

/// Dispatches every direct child of `node` to `visitor`, in declaration
/// order. Visitors that want to reach the whole tree call this from their
/// handlers.
pub fn walk_children<V: Visitor + ?Sized>(visitor: &mut V, node: &Node) {
    for child in node.children() {
        child.accept(visitor);
    }
}

/// Calls `f` on `root` and every descendant, parents before children.
pub fn for_each_node<F: FnMut(&NodeRef)>(root: &NodeRef, f: F) {
    struct Walker<F> {
        f: F,
    }

    impl<F: FnMut(&NodeRef)> Visitor for Walker<F> {
        fn unhandled(&mut self, node: &NodeRef) {
            (self.f)(node);
            walk_children(self, node);
        }
    }

    root.accept(&mut Walker { f });
}
