//! The node handle and the lifecycle operations shared by every kind.
//!
//! A tree is a graph of [`NodeRef`]s: parents own their children through
//! [`Slot`]s and [`NodeCollection`]s, children point back with a
//! [`WeakNodeRef`]. The algorithms here never look at concrete kinds; they
//! walk the field descriptors each kind declares in `nodes.rs`.
//!
//! [`NodeCollection`]: crate::collection::NodeCollection

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use tracing::{trace, warn};

use crate::{
    annotations::Annotations,
    errors::AstError,
    fields::Field,
    nodes::{Location, NodeData, NodeKind, NodeType, SourcePosition},
    slot::Slot,
};

pub type NodeRef = Rc<Node>;
pub type WeakNodeRef = Weak<Node>;

const MODIFIER: &str = "modifier";

#[derive(Debug)]
pub struct Node {
    location: RefCell<Location>,
    end_location: Cell<Option<SourcePosition>>,
    documentation: RefCell<Option<String>>,
    pub(crate) annotations: RefCell<Option<Annotations>>,
    parent: RefCell<WeakNodeRef>,
    data: NodeData,
}

impl Node {
    /// Wraps a payload into a detached node. Children already placed in the
    /// payload are linked to the new node.
    pub fn new(data: impl Into<NodeData>) -> NodeRef {
        Self::assemble(data.into(), Location::default())
    }

    pub fn with_location(data: impl Into<NodeData>, location: Location) -> NodeRef {
        Self::assemble(data.into(), location)
    }

    fn assemble(data: NodeData, location: Location) -> NodeRef {
        Rc::new_cyclic(|this| {
            for field in data.base_fields() {
                field.adopt(this);
            }
            for field in data.fields() {
                field.adopt(this);
            }
            Node {
                location: RefCell::new(location),
                end_location: Cell::new(None),
                documentation: RefCell::new(None),
                annotations: RefCell::new(None),
                parent: RefCell::new(Weak::new()),
                data,
            }
        })
    }

    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }

    #[must_use]
    pub fn data(&self) -> &NodeData {
        &self.data
    }

    /// The typed payload, if this node is a `T`.
    #[must_use]
    pub fn cast<T: NodeType>(&self) -> Option<&T> {
        T::from_data(&self.data)
    }

    /// Like [`Node::cast`], for callers that treat the wrong kind as a bug.
    ///
    /// # Errors
    ///
    /// Returns [`AstError::UnexpectedKind`] if this node is not a `T`.
    pub fn expect_kind<T: NodeType>(&self) -> Result<&T, AstError> {
        self.cast::<T>().ok_or(AstError::UnexpectedKind {
            expected: T::KIND,
            found: self.kind(),
        })
    }

    #[must_use]
    pub fn location(&self) -> Location {
        self.location.borrow().clone()
    }

    pub fn set_location(&self, location: Location) {
        *self.location.borrow_mut() = location;
    }

    #[must_use]
    pub fn end_location(&self) -> Option<SourcePosition> {
        self.end_location.get()
    }

    pub fn set_end_location(&self, position: Option<SourcePosition>) {
        self.end_location.set(position);
    }

    #[must_use]
    pub fn documentation(&self) -> Option<String> {
        self.documentation.borrow().clone()
    }

    pub fn set_documentation(&self, documentation: Option<String>) {
        *self.documentation.borrow_mut() = documentation;
    }

    /// `None` for roots and for nodes that have been removed from their holder.
    #[must_use]
    pub fn parent(&self) -> Option<NodeRef> {
        self.parent.borrow().upgrade()
    }

    /// Whether this node's back-link points at `parent`.
    #[must_use]
    pub fn is_child_of(&self, parent: &Node) -> bool {
        std::ptr::eq(self.parent.borrow().as_ptr(), parent)
    }

    pub(crate) fn set_parent(&self, parent: WeakNodeRef) {
        *self.parent.borrow_mut() = parent;
    }

    /// Clears the back-link, but only if it still points at `holder`. A node
    /// that was moved elsewhere keeps its new parent.
    pub(crate) fn detach_from(&self, holder: &WeakNodeRef) {
        let mut parent = self.parent.borrow_mut();
        if parent.ptr_eq(holder) {
            *parent = Weak::new();
        }
    }

    /// Parent first, root last.
    #[must_use]
    pub fn ancestors(&self) -> Vec<NodeRef> {
        let mut ancestors = Vec::new();
        let mut current = self.parent();
        while let Some(node) = current {
            current = node.parent();
            ancestors.push(node);
        }
        ancestors
    }

    /// Direct children in declaration order: shared base fields first, then
    /// the kind's own fields, collections expanded in place.
    #[must_use]
    pub fn children(&self) -> Vec<NodeRef> {
        let mut children = Vec::new();
        for field in self.data.base_fields() {
            children.extend(field.nodes());
        }
        for field in self.data.fields() {
            children.extend(field.nodes());
        }
        children
    }

    /// The statement modifier. Always `None` for kinds that are not statements.
    #[must_use]
    pub fn modifier(&self) -> Option<NodeRef> {
        self.base_slot(MODIFIER).ok().and_then(Slot::get)
    }

    /// # Errors
    ///
    /// Returns [`AstError::UnknownField`] if this kind has no modifier and
    /// [`AstError::IncompatibleNode`] if `modifier` is not a
    /// `StatementModifier`.
    pub fn set_modifier(&self, modifier: Option<NodeRef>) -> Result<(), AstError> {
        self.base_slot(MODIFIER)?.set(modifier)
    }

    fn base_slot(&self, name: &'static str) -> Result<&Slot, AstError> {
        self.data
            .base_fields()
            .into_iter()
            .find_map(|field| match field {
                Field::Child { name: n, slot, .. } if n == name => Some(slot),
                _ => None,
            })
            .ok_or(AstError::UnknownField {
                kind: self.kind(),
                field: name,
            })
    }

    /// Copies the subtree. Locations, documentation and annotations are
    /// copied by value; annotation values themselves are not cloned. Lazy
    /// children that were never materialized stay unmaterialized. The copy
    /// is detached.
    #[must_use]
    pub fn deep_clone(&self) -> NodeRef {
        let clone = Self::assemble(self.data.clone_fields(), self.location());
        clone.end_location.set(self.end_location.get());
        *clone.documentation.borrow_mut() = self.documentation();
        *clone.annotations.borrow_mut() = self.annotations.borrow().clone();
        trace!(kind = %self.kind(), "cloned node");
        clone
    }

    /// Substitutes `replacement` for the direct child `existing`, matched by
    /// identity. The kind's own fields are searched before the shared base
    /// fields. Children of children are not searched; see
    /// [`crate::rewrite::replace_all`] for that.
    ///
    /// Returns `Ok(false)` and changes nothing when `existing` is not a
    /// direct child.
    ///
    /// # Errors
    ///
    /// Returns [`AstError::IncompatibleNode`] if `existing` was found but
    /// `replacement` cannot occupy its field.
    pub fn replace(&self, existing: &Node, replacement: NodeRef) -> Result<bool, AstError> {
        let own = self.data.fields();
        let base = self.data.base_fields();
        for field in own.iter().chain(base.iter()) {
            if field.replace(existing, &replacement)? {
                debug_assert!(replacement.is_child_of(self));
                trace!(
                    kind = %self.kind(),
                    field = field.name(),
                    replacement = %replacement.kind(),
                    "replaced child"
                );
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Drops the annotation store of this node and of every descendant,
    /// including the shared modifier field.
    pub fn clear_bindings(&self) {
        *self.annotations.borrow_mut() = None;
        for child in self.children() {
            child.clear_bindings();
        }
        trace!(kind = %self.kind(), "cleared bindings");
    }

    /// Checks that every descendant's back-link points at the node holding it.
    ///
    /// # Errors
    ///
    /// Returns [`AstError::ParentMismatch`] for the first child, in
    /// pre-order, whose parent link is wrong.
    pub fn verify_parents(&self) -> Result<(), AstError> {
        for child in self.children() {
            if !child.is_child_of(self) {
                warn!(
                    kind = %child.kind(),
                    holder = %self.kind(),
                    location = %child.location(),
                    "broken parent link"
                );
                return Err(AstError::ParentMismatch {
                    kind: child.kind(),
                    holder: self.kind(),
                });
            }
            child.verify_parents()?;
        }
        Ok(())
    }
}
