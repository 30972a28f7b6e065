//! Ordered child collections.
//!
//! A [`NodeCollection`] is owned by exactly one node (it is a plain field of
//! the node's payload and cannot be cloned as a handle). Every insertion
//! checks the element category and links the element to the owner; every
//! removal unlinks it. Order is source order and is preserved by all
//! operations.

use std::cell::RefCell;
use std::rc::Weak;

use crate::{
    errors::AstError,
    node::{Node, NodeRef, WeakNodeRef},
    nodes::NodeCategory,
};

#[derive(Debug)]
pub struct NodeCollection {
    path: &'static str,
    category: NodeCategory,
    owner: RefCell<WeakNodeRef>,
    items: RefCell<Vec<NodeRef>>,
}

impl NodeCollection {
    pub(crate) fn new(path: &'static str, category: NodeCategory) -> Self {
        Self {
            path,
            category,
            owner: RefCell::new(Weak::new()),
            items: RefCell::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &'static str {
        self.path
    }

    #[must_use]
    pub fn category(&self) -> NodeCategory {
        self.category
    }

    #[must_use]
    pub fn owner(&self) -> Option<NodeRef> {
        self.owner.borrow().upgrade()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<NodeRef> {
        self.items.borrow().get(index).cloned()
    }

    #[must_use]
    pub fn first(&self) -> Option<NodeRef> {
        self.items.borrow().first().cloned()
    }

    #[must_use]
    pub fn last(&self) -> Option<NodeRef> {
        self.items.borrow().last().cloned()
    }

    /// A snapshot of the elements. Mutating the collection afterwards does
    /// not affect the returned vector.
    #[must_use]
    pub fn nodes(&self) -> Vec<NodeRef> {
        self.items.borrow().clone()
    }

    #[must_use]
    pub fn position(&self, node: &Node) -> Option<usize> {
        self.items
            .borrow()
            .iter()
            .position(|item| std::ptr::eq(item.as_ref(), node))
    }

    #[must_use]
    pub fn contains(&self, node: &Node) -> bool {
        self.position(node).is_some()
    }

    /// Appends `node` and links it to the owner.
    ///
    /// # Errors
    ///
    /// Returns [`AstError::IncompatibleNode`] if the node's kind does not
    /// belong to this collection's category.
    pub fn add(&self, node: NodeRef) -> Result<(), AstError> {
        self.check(&node)?;
        node.set_parent(self.owner.borrow().clone());
        self.items.borrow_mut().push(node);
        Ok(())
    }

    /// Inserts `node` before the element currently at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`AstError::IncompatibleNode`] for a node of the wrong kind
    /// and [`AstError::IndexOutOfBounds`] if `index > len`.
    pub fn insert(&self, index: usize, node: NodeRef) -> Result<(), AstError> {
        self.check(&node)?;
        let len = self.len();
        if index > len {
            return Err(AstError::IndexOutOfBounds {
                collection: self.path,
                index,
                len,
            });
        }
        node.set_parent(self.owner.borrow().clone());
        self.items.borrow_mut().insert(index, node);
        Ok(())
    }

    /// Appends every node, or none of them if any has the wrong kind.
    ///
    /// # Errors
    ///
    /// Returns [`AstError::IncompatibleNode`] for the first offending node.
    pub fn extend<I>(&self, nodes: I) -> Result<(), AstError>
    where
        I: IntoIterator<Item = NodeRef>,
    {
        let nodes: Vec<NodeRef> = nodes.into_iter().collect();
        for node in &nodes {
            self.check(node)?;
        }
        for node in nodes {
            self.add(node)?;
        }
        Ok(())
    }

    /// Replaces the whole content with `nodes`.
    ///
    /// # Errors
    ///
    /// Returns [`AstError::IncompatibleNode`] for the first offending node;
    /// the collection is unchanged in that case.
    pub fn reset<I>(&self, nodes: I) -> Result<(), AstError>
    where
        I: IntoIterator<Item = NodeRef>,
    {
        let nodes: Vec<NodeRef> = nodes.into_iter().collect();
        for node in &nodes {
            self.check(node)?;
        }
        self.clear();
        self.extend(nodes)
    }

    /// Removes the first element that is `node` by identity.
    pub fn remove(&self, node: &Node) -> bool {
        let Some(index) = self.position(node) else {
            return false;
        };
        let removed = self.items.borrow_mut().remove(index);
        removed.detach_from(&self.owner.borrow());
        true
    }

    /// # Errors
    ///
    /// Returns [`AstError::IndexOutOfBounds`] if there is no element at `index`.
    pub fn remove_at(&self, index: usize) -> Result<NodeRef, AstError> {
        let len = self.len();
        if index >= len {
            return Err(AstError::IndexOutOfBounds {
                collection: self.path,
                index,
                len,
            });
        }
        let removed = self.items.borrow_mut().remove(index);
        removed.detach_from(&self.owner.borrow());
        Ok(removed)
    }

    pub fn clear(&self) {
        let removed = std::mem::take(&mut *self.items.borrow_mut());
        let owner = self.owner.borrow();
        for node in removed {
            node.detach_from(&owner);
        }
    }

    /// Substitutes `replacement` for the first element that is `existing` by
    /// identity, keeping its position.
    ///
    /// # Errors
    ///
    /// Returns [`AstError::IncompatibleNode`] if `existing` is present but
    /// `replacement` does not belong to this collection's category.
    pub fn replace(&self, existing: &Node, replacement: NodeRef) -> Result<bool, AstError> {
        let Some(index) = self.position(existing) else {
            return Ok(false);
        };
        self.check(&replacement)?;
        if std::ptr::eq(existing, replacement.as_ref()) {
            return Ok(true);
        }
        let owner = self.owner.borrow().clone();
        replacement.set_parent(owner.clone());
        let previous = std::mem::replace(&mut self.items.borrow_mut()[index], replacement);
        previous.detach_from(&owner);
        Ok(true)
    }

    pub(crate) fn adopt(&self, owner: &WeakNodeRef) {
        *self.owner.borrow_mut() = owner.clone();
        for node in self.items.borrow().iter() {
            node.set_parent(owner.clone());
        }
    }

    /// A fresh, unowned collection of deep clones.
    pub(crate) fn deep_clone(&self) -> NodeCollection {
        NodeCollection {
            path: self.path,
            category: self.category,
            owner: RefCell::new(Weak::new()),
            items: RefCell::new(
                self.items
                    .borrow()
                    .iter()
                    .map(|node| node.deep_clone())
                    .collect(),
            ),
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
