//! Structural equality.
//!
//! Two trees match when they have the same kinds, equal scalar values and
//! matching children in the same order. Locations, documentation and
//! annotations are not part of the comparison. The first divergence is
//! reported as a [`Mismatch`]; a mismatch is a result, never an error.

use core::fmt;
use std::fmt::{Display, Formatter};

use tracing::debug;

use crate::{
    fields::Field,
    node::Node,
    nodes::{NodeData, NodeKind},
};

/// One step of the path from the compared roots down to a divergence.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct FieldStep {
    pub kind: NodeKind,
    pub field: &'static str,
    /// Element index, for steps into a collection.
    pub index: Option<usize>,
}

impl Display for FieldStep {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}.{}", self.kind, self.field)?;
        if let Some(index) = self.index {
            write!(f, "[{index}]")?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MismatchReason {
    Kind { left: NodeKind, right: NodeKind },
    Value,
    Presence,
    Length { left: usize, right: usize },
    /// The two sides declare different field layouts.
    Shape,
}

impl Display for MismatchReason {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            MismatchReason::Kind { left, right } => write!(f, "`{left}` differs from `{right}`"),
            MismatchReason::Value => write!(f, "values differ"),
            MismatchReason::Presence => write!(f, "present on one side only"),
            MismatchReason::Length { left, right } => {
                write!(f, "lengths differ ({left} vs {right})")
            }
            MismatchReason::Shape => write!(f, "field layouts differ"),
        }
    }
}

/// Where and why two trees diverge.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Mismatch {
    pub path: Vec<FieldStep>,
    pub reason: MismatchReason,
}

impl Mismatch {
    /// The path rendered as `Kind.field[i] > Kind.field`. Empty when the
    /// roots themselves differ.
    #[must_use]
    pub fn path_string(&self) -> String {
        self.path
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" > ")
    }

    /// The last step, i.e. the field that actually differs.
    #[must_use]
    pub fn field(&self) -> Option<&FieldStep> {
        self.path.last()
    }
}

impl Display for Mismatch {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "<root>: {}", self.reason)
        } else {
            write!(f, "{}: {}", self.path_string(), self.reason)
        }
    }
}

impl Node {
    /// Structural equality with `other`. On failure the divergence is
    /// logged at debug level; [`Node::mismatch`] returns it.
    #[must_use]
    pub fn matches(&self, other: &Node) -> bool {
        match self.mismatch(other) {
            None => true,
            Some(mismatch) => {
                debug!(path = %mismatch, "nodes do not match");
                false
            }
        }
    }

    /// The first divergence from `other` in pre-order, or `None` if the
    /// trees match.
    #[must_use]
    pub fn mismatch(&self, other: &Node) -> Option<Mismatch> {
        let mut path = Vec::new();
        compare(self, other, &mut path)
            .err()
            .map(|reason| Mismatch { path, reason })
    }
}

/// Structural equality over optional nodes: two absent nodes match, an
/// absent and a present one do not.
#[must_use]
pub fn nodes_match(left: Option<&Node>, right: Option<&Node>) -> bool {
    match (left, right) {
        (None, None) => true,
        (Some(left), Some(right)) => left.matches(right),
        _ => false,
    }
}

impl NodeData {
    /// Default values, no non-lazy children, empty collections and only
    /// pristine lazy children. This is the state a lazy field is in right
    /// after its first access.
    pub(crate) fn is_pristine(&self) -> bool {
        self.value_mismatch(&NodeData::empty(self.kind())).is_none()
            && self.base_fields().iter().all(Field::is_vacant)
            && self.fields().iter().all(Field::is_vacant)
    }
}

fn compare(left: &Node, right: &Node, path: &mut Vec<FieldStep>) -> Result<(), MismatchReason> {
    if std::ptr::eq(left, right) {
        return Ok(());
    }
    let kind = left.kind();
    if kind != right.kind() {
        return Err(MismatchReason::Kind {
            left: kind,
            right: right.kind(),
        });
    }
    compare_fields(
        kind,
        &left.data().base_fields(),
        &right.data().base_fields(),
        path,
    )?;
    if let Some(field) = left.data().value_mismatch(right.data()) {
        path.push(FieldStep {
            kind,
            field,
            index: None,
        });
        return Err(MismatchReason::Value);
    }
    compare_fields(kind, &left.data().fields(), &right.data().fields(), path)
}

fn compare_fields(
    kind: NodeKind,
    left: &[Field<'_>],
    right: &[Field<'_>],
    path: &mut Vec<FieldStep>,
) -> Result<(), MismatchReason> {
    if left.len() != right.len() {
        return Err(MismatchReason::Shape);
    }
    for (l, r) in left.iter().zip(right) {
        path.push(FieldStep {
            kind,
            field: l.name(),
            index: None,
        });
        compare_field(l, r, path)?;
        path.pop();
    }
    Ok(())
}

fn compare_field(
    left: &Field<'_>,
    right: &Field<'_>,
    path: &mut Vec<FieldStep>,
) -> Result<(), MismatchReason> {
    match (left, right) {
        (Field::Child { slot: l, lazy, .. }, Field::Child { slot: r, .. }) => {
            match (l.get(), r.get()) {
                (None, None) => Ok(()),
                (Some(l), Some(r)) => compare(&l, &r, path),
                // An unaccessed lazy field equals one accessed but left untouched.
                (Some(node), None) | (None, Some(node)) if *lazy && node.data().is_pristine() => {
                    Ok(())
                }
                _ => Err(MismatchReason::Presence),
            }
        }
        (Field::List { list: l, .. }, Field::List { list: r, .. }) => {
            let (l, r) = (l.nodes(), r.nodes());
            if l.len() != r.len() {
                return Err(MismatchReason::Length {
                    left: l.len(),
                    right: r.len(),
                });
            }
            for (index, (l, r)) in l.iter().zip(&r).enumerate() {
                if let Some(step) = path.last_mut() {
                    step.index = Some(index);
                }
                compare(l, r, path)?;
            }
            Ok(())
        }
        _ => Err(MismatchReason::Shape),
    }
}
