//! Per-node annotation store.
//!
//! Later phases (binding, type checking, macro expansion) cache their
//! results on nodes here without the tree depending on their types.
//! `Node` values are weak: an annotation never keeps a subtree alive.

use std::rc::{Rc, Weak};

use rustc_hash::FxHashMap;

use crate::node::{Node, NodeRef, WeakNodeRef};

#[derive(Debug, Clone)]
pub enum AnnotationValue {
    Flag(bool),
    Integer(i64),
    Text(String),
    Node(WeakNodeRef),
    List(Vec<AnnotationValue>),
}

impl AnnotationValue {
    #[must_use]
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            AnnotationValue::Flag(flag) => Some(*flag),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            AnnotationValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnnotationValue::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// `None` also when the referenced node has been dropped.
    #[must_use]
    pub fn as_node(&self) -> Option<NodeRef> {
        match self {
            AnnotationValue::Node(node) => node.upgrade(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[AnnotationValue]> {
        match self {
            AnnotationValue::List(values) => Some(values.as_slice()),
            _ => None,
        }
    }
}

impl PartialEq for AnnotationValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (AnnotationValue::Flag(a), AnnotationValue::Flag(b)) => a == b,
            (AnnotationValue::Integer(a), AnnotationValue::Integer(b)) => a == b,
            (AnnotationValue::Text(a), AnnotationValue::Text(b)) => a == b,
            (AnnotationValue::Node(a), AnnotationValue::Node(b)) => Weak::ptr_eq(a, b),
            (AnnotationValue::List(a), AnnotationValue::List(b)) => a == b,
            _ => false,
        }
    }
}

impl From<bool> for AnnotationValue {
    fn from(value: bool) -> Self {
        AnnotationValue::Flag(value)
    }
}

impl From<i64> for AnnotationValue {
    fn from(value: i64) -> Self {
        AnnotationValue::Integer(value)
    }
}

impl From<&str> for AnnotationValue {
    fn from(value: &str) -> Self {
        AnnotationValue::Text(value.to_string())
    }
}

impl From<String> for AnnotationValue {
    fn from(value: String) -> Self {
        AnnotationValue::Text(value)
    }
}

impl From<&NodeRef> for AnnotationValue {
    fn from(node: &NodeRef) -> Self {
        AnnotationValue::Node(Rc::downgrade(node))
    }
}

impl From<Vec<AnnotationValue>> for AnnotationValue {
    fn from(values: Vec<AnnotationValue>) -> Self {
        AnnotationValue::List(values)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Annotations {
    entries: FxHashMap<String, AnnotationValue>,
}

impl Annotations {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&AnnotationValue> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: String, value: AnnotationValue) -> Option<AnnotationValue> {
        self.entries.insert(key, value)
    }

    pub fn remove(&mut self, key: &str) -> Option<AnnotationValue> {
        self.entries.remove(key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in sorted order, so diagnostics are stable.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl Node {
    /// Stores `value` under `key`, creating the store on first use, and
    /// returns the value it displaced.
    pub fn annotate(
        &self,
        key: impl Into<String>,
        value: impl Into<AnnotationValue>,
    ) -> Option<AnnotationValue> {
        self.annotations
            .borrow_mut()
            .get_or_insert_with(Annotations::default)
            .insert(key.into(), value.into())
    }

    #[must_use]
    pub fn annotation(&self, key: &str) -> Option<AnnotationValue> {
        self.annotations
            .borrow()
            .as_ref()
            .and_then(|annotations| annotations.get(key).cloned())
    }

    #[must_use]
    pub fn has_annotation(&self, key: &str) -> bool {
        self.annotations
            .borrow()
            .as_ref()
            .is_some_and(|annotations| annotations.contains(key))
    }

    pub fn remove_annotation(&self, key: &str) -> Option<AnnotationValue> {
        self.annotations
            .borrow_mut()
            .as_mut()
            .and_then(|annotations| annotations.remove(key))
    }

    #[must_use]
    pub fn annotation_keys(&self) -> Vec<String> {
        self.annotations
            .borrow()
            .as_ref()
            .map(Annotations::keys)
            .unwrap_or_default()
    }

    /// Whether the store has been created. It is dropped again by
    /// [`Node::clear_bindings`].
    #[must_use]
    pub fn has_annotations(&self) -> bool {
        self.annotations.borrow().is_some()
    }

    /// A copy of the whole store; values are copied shallowly.
    #[must_use]
    pub fn annotations(&self) -> Option<Annotations> {
        self.annotations.borrow().clone()
    }
}
