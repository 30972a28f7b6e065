//! Deep rewriting built from the one-level [`Node::replace`].

use tracing::trace;

use crate::{errors::AstError, node::NodeRef};

/// Walks the tree below `root` in pre-order and offers every node to `f`.
/// When `f` returns a replacement, the node's parent substitutes it in place
/// and the walk does not descend into the replacement. `root` itself is
/// never offered.
///
/// Returns the number of replacements made.
///
/// # Errors
///
/// Returns [`AstError::IncompatibleNode`] if a replacement cannot occupy the
/// field of the node it replaces. Replacements made before that stay in place.
pub fn replace_all<F>(root: &NodeRef, mut f: F) -> Result<usize, AstError>
where
    F: FnMut(&NodeRef) -> Option<NodeRef>,
{
    let mut count = 0;
    rewrite_children(root, &mut f, &mut count)?;
    trace!(root = %root.kind(), count, "rewrite finished");
    Ok(count)
}

fn rewrite_children<F>(node: &NodeRef, f: &mut F, count: &mut usize) -> Result<(), AstError>
where
    F: FnMut(&NodeRef) -> Option<NodeRef>,
{
    for child in node.children() {
        match f(&child) {
            Some(replacement) => {
                if node.replace(&child, replacement)? {
                    *count += 1;
                }
            }
            None => rewrite_children(&child, f, count)?,
        }
    }
    Ok(())
}
