#![warn(clippy::pedantic)]
pub mod annotations;
pub mod builder;
pub mod collection;
pub mod errors;
pub(crate) mod fields;
pub mod matches;
pub mod node;
pub mod nodes;
pub(crate) mod nodes_impl;
pub mod rewrite;
pub mod slot;
pub mod visitor;

pub use node::{Node, NodeRef, WeakNodeRef};
