//! Single-child fields.
//!
//! A [`Slot`] holds at most one child node of a declared category and knows
//! the node that owns it, so assigning into it keeps the child's parent link
//! current without the caller doing anything else.

use std::cell::RefCell;
use std::rc::Weak;

use tracing::trace;

use crate::{
    errors::AstError,
    node::{Node, NodeRef, WeakNodeRef},
    nodes::{NodeCategory, NodeData, NodeKind},
};

#[derive(Debug)]
pub struct Slot {
    path: &'static str,
    category: NodeCategory,
    owner: RefCell<WeakNodeRef>,
    node: RefCell<Option<NodeRef>>,
}

impl Slot {
    pub(crate) fn new(path: &'static str, category: NodeCategory) -> Self {
        Self {
            path,
            category,
            owner: RefCell::new(Weak::new()),
            node: RefCell::new(None),
        }
    }

    /// `Kind.field` of the declaring node, used in diagnostics.
    #[must_use]
    pub fn path(&self) -> &'static str {
        self.path
    }

    #[must_use]
    pub fn category(&self) -> NodeCategory {
        self.category
    }

    #[must_use]
    pub fn get(&self) -> Option<NodeRef> {
        self.node.borrow().clone()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.node.borrow().is_none()
    }

    /// Reference identity, not structural equality.
    #[must_use]
    pub fn holds(&self, node: &Node) -> bool {
        self.node
            .borrow()
            .as_ref()
            .is_some_and(|held| std::ptr::eq(held.as_ref(), node))
    }

    /// Assigns `node` (or clears the slot with `None`).
    ///
    /// The previous occupant loses its parent link; the new one is linked to
    /// the owner. Assigning the current occupant again changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`AstError::IncompatibleNode`] if the node's kind is not
    /// assignable to this slot's category. The slot is left untouched.
    pub fn set(&self, node: Option<NodeRef>) -> Result<(), AstError> {
        if let Some(new) = &node {
            self.check(new)?;
            if self.holds(new) {
                return Ok(());
            }
        }
        let owner = self.owner.borrow().clone();
        if let Some(previous) = self.node.replace(node) {
            previous.detach_from(&owner);
        }
        if let Some(current) = self.node.borrow().as_ref() {
            current.set_parent(owner);
        }
        Ok(())
    }

    /// Returns the occupant, first creating an empty node of `kind` if the
    /// slot is vacant.
    pub(crate) fn get_or_create(&self, kind: NodeKind) -> NodeRef {
        if let Some(node) = self.get() {
            return node;
        }
        debug_assert!(self.category.accepts(kind));
        let node = Node::new(NodeData::empty(kind));
        node.set_parent(self.owner.borrow().clone());
        *self.node.borrow_mut() = Some(node.clone());
        trace!(slot = self.path, "materialized lazy child");
        node
    }

    pub(crate) fn replace(&self, existing: &Node, replacement: &NodeRef) -> Result<bool, AstError> {
        if !self.holds(existing) {
            return Ok(false);
        }
        self.set(Some(replacement.clone()))?;
        Ok(true)
    }

    pub(crate) fn adopt(&self, owner: &WeakNodeRef) {
        *self.owner.borrow_mut() = owner.clone();
        if let Some(node) = self.node.borrow().as_ref() {
            node.set_parent(owner.clone());
        }
    }

    /// An unowned copy whose occupant, if any, is a deep clone.
    pub(crate) fn deep_clone(&self) -> Slot {
        Slot {
            path: self.path,
            category: self.category,
            owner: RefCell::new(Weak::new()),
            node: RefCell::new(self.get().map(|node| node.deep_clone())),
        }
    }

    fn check(&self, node: &Node) -> Result<(), AstError> {
        if self.category.accepts(node.kind()) {
            Ok(())
        } else {
            Err(AstError::IncompatibleNode {
                slot: self.path,
                expected: self.category,
                found: node.kind(),
            })
        }
    }
}
