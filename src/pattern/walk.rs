//! The walk driver: one pre-order traversal feeding every matcher.
//!
//! The traversal is driven over the *live* tree — children are re-read after
//! every visit, so nodes a callback splices in ahead of the cursor are still
//! visited. That is also the hazard: a callback may freely mutate subtrees
//! the walk has already completed and the current node's own content, but if
//! it removes or reorders a container the walk has not finished, the
//! continuation order over those nodes is implementation-defined.

use super::matcher::{Matcher, feed_all};
use super::selection::SelectionError;
use crate::syntax::{NodeId, Tree};

/// Walk the whole tree from its root. A tree without a root (never parsed,
/// no `set_root`) is trivially walked.
pub fn walk(tree: &mut Tree, matchers: &mut [Matcher]) -> Result<(), SelectionError> {
    match tree.root() {
        Some(root) => walk_from(tree, root, matchers),
        None => Ok(()),
    }
}

/// Walk the subtree under `start` in pre-order: visit a node, then its
/// children in field-declaration order.
pub fn walk_from(
    tree: &mut Tree,
    start: NodeId,
    matchers: &mut [Matcher],
) -> Result<(), SelectionError> {
    feed_all(matchers, tree, start)?;
    let mut i = 0;
    loop {
        // Children are recomputed each step so callback edits to this
        // node's remaining children are honored.
        let children = tree.children(start);
        let Some(&child) = children.get(i) else {
            break;
        };
        walk_from(tree, child, matchers)?;
        i += 1;
    }
    Ok(())
}
