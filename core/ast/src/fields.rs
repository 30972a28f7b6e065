//! Field descriptors.
//!
//! Each node kind lists its child-bearing fields as [`Field`]s (see the
//! `ast_node!` table in `nodes.rs`). The lifecycle algorithms in `node.rs`
//! and `matches.rs` only ever see these descriptors, never the concrete
//! structs.

use crate::{
    collection::NodeCollection,
    errors::AstError,
    node::{Node, NodeRef, WeakNodeRef},
    slot::Slot,
};

pub(crate) enum Field<'a> {
    Child {
        name: &'static str,
        slot: &'a Slot,
        lazy: bool,
    },
    List {
        name: &'static str,
        list: &'a NodeCollection,
    },
}

impl Field<'_> {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Field::Child { name, .. } | Field::List { name, .. } => *name,
        }
    }

    pub(crate) fn nodes(&self) -> Vec<NodeRef> {
        match self {
            Field::Child { slot, .. } => slot.get().into_iter().collect(),
            Field::List { list, .. } => list.nodes(),
        }
    }

    pub(crate) fn adopt(&self, owner: &WeakNodeRef) {
        match self {
            Field::Child { slot, .. } => slot.adopt(owner),
            Field::List { list, .. } => list.adopt(owner),
        }
    }

    pub(crate) fn replace(&self, existing: &Node, replacement: &NodeRef) -> Result<bool, AstError> {
        match self {
            Field::Child { slot, .. } => slot.replace(existing, replacement),
            Field::List { list, .. } => list.replace(existing, replacement.clone()),
        }
    }

    /// True when the field holds nothing, or only a lazily created child
    /// that is itself still pristine.
    pub(crate) fn is_vacant(&self) -> bool {
        match self {
            Field::Child { slot, lazy, .. } => slot
                .get()
                .is_none_or(|node| *lazy && node.data().is_pristine()),
            Field::List { list, .. } => list.is_empty(),
        }
    }
}
