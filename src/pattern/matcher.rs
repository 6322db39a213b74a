//! The sequential matching automaton.
//!
//! A matcher holds one condition chain and a cursor. Each visited node
//! either advances the cursor (condition at the cursor accepted it) or
//! snaps it back to zero. Completing the chain fires the callback and
//! resets, so the same matcher can fire again later in the same walk,
//! including on the visit immediately after a completion.
//!
//! There is no backtracking: when a condition at position `i > 0` rejects a
//! node, that node is *not* re-tested against the chain head — only the next
//! visited node starts a fresh attempt. Chains therefore match strictly
//! consecutive visits.

use super::condition::NodeCondition;
use super::selection::SelectionError;
use crate::syntax::{NodeId, Tree};

/// Completion callback. Runs inline during the walk with mutable access to
/// the tree; capture reads go through the session's `Selections`.
pub type MatchHook = Box<dyn FnMut(&mut Tree) -> Result<(), SelectionError>>;

pub struct Matcher {
    chain: Vec<NodeCondition>,
    cursor: usize,
    on_match: MatchHook,
    completed: Vec<NodeId>,
}

impl Matcher {
    pub fn new(
        chain: Vec<NodeCondition>,
        on_match: impl FnMut(&mut Tree) -> Result<(), SelectionError> + 'static,
    ) -> Self {
        Self {
            chain,
            cursor: 0,
            on_match: Box::new(on_match),
            completed: Vec::new(),
        }
    }

    /// Feed one visited node. An empty chain never fires.
    pub fn feed(&mut self, tree: &mut Tree, node: NodeId) -> Result<(), SelectionError> {
        let Some(cond) = self.chain.get(self.cursor) else {
            return Ok(());
        };
        if cond(tree, Some(node)) {
            self.cursor += 1;
            if self.cursor >= self.chain.len() {
                self.cursor = 0;
                self.completed.push(node);
                (self.on_match)(tree)?;
            }
        } else {
            self.cursor = 0;
        }
        Ok(())
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Nodes that completed the chain, in firing order.
    pub fn completions(&self) -> &[NodeId] {
        &self.completed
    }

    pub fn take_completions(&mut self) -> Vec<NodeId> {
        std::mem::take(&mut self.completed)
    }
}

/// Feed a node to every matcher of a group, in registration order. Matchers
/// completing on the same node therefore fire in registration order.
pub fn feed_all(
    matchers: &mut [Matcher],
    tree: &mut Tree,
    node: NodeId,
) -> Result<(), SelectionError> {
    for matcher in matchers.iter_mut() {
        matcher.feed(tree, node)?;
    }
    Ok(())
}
