//! Capture store: remembers *where* a condition matched.
//!
//! Wrapping a condition with [`Selections::select`] records the id of the
//! node that satisfied it, under a caller-chosen key. Because the arena
//! hands out stable ids, a recorded slot stays valid for the callback to
//! mutate through, even after other edits. A `Selections` value is a cheap
//! handle to one matching session's store: clones share the same slots, so
//! conditions and the completion callback observe the same captures.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use thiserror::Error;

use super::condition::{NodeCondition, NodesCondition};
use crate::syntax::{NodeId, NodeKind, Tree};

/// Fail-loud capture retrieval errors. Both indicate a logic error in the
/// pairing of a condition chain and its callback, not a data condition, so
/// they abort the enclosing operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("no node captured under key {0:?}")]
    Missing(String),
    #[error("capture {key:?} is a {actual}, expected {expected}")]
    KindMismatch {
        key: String,
        expected: NodeKind,
        actual: NodeKind,
    },
}

#[derive(Debug, Clone, Default)]
pub struct Selections {
    slots: Rc<RefCell<HashMap<String, Vec<NodeId>>>>,
}

impl Selections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a condition so that, when it accepts a node, the node's id is
    /// recorded under `key`. A rejection leaves the store untouched; a later
    /// acceptance under the same key overwrites the earlier one, so a
    /// callback only ever sees the slots of the match that fired it.
    pub fn select(&self, cond: NodeCondition, key: impl Into<String>) -> NodeCondition {
        let store = self.clone();
        let key = key.into();
        Box::new(move |tree, node| {
            let hit = cond(tree, node);
            if hit {
                if let Some(id) = node {
                    store.slots.borrow_mut().insert(key.clone(), vec![id]);
                }
            }
            hit
        })
    }

    /// List variant of [`select`](Self::select): records one slot per
    /// element of the accepted list, preserving order.
    pub fn select_nodes(&self, cond: NodesCondition, key: impl Into<String>) -> NodesCondition {
        let store = self.clone();
        let key = key.into();
        Box::new(move |tree, nodes| {
            let hit = cond(tree, nodes);
            if hit {
                store.slots.borrow_mut().insert(key.clone(), nodes.to_vec());
            }
            hit
        })
    }

    /// The first (usually only) node captured under `key`.
    pub fn node(&self, key: &str) -> Result<NodeId, SelectionError> {
        self.slots
            .borrow()
            .get(key)
            .and_then(|ids| ids.first().copied())
            .ok_or_else(|| SelectionError::Missing(key.to_string()))
    }

    /// All nodes captured under `key`, in match order.
    pub fn nodes(&self, key: &str) -> Result<Vec<NodeId>, SelectionError> {
        self.slots
            .borrow()
            .get(key)
            .cloned()
            .ok_or_else(|| SelectionError::Missing(key.to_string()))
    }

    /// The node captured under `key`, asserting its kind.
    pub fn of_kind(
        &self,
        tree: &Tree,
        key: &str,
        expected: NodeKind,
    ) -> Result<NodeId, SelectionError> {
        let id = self.node(key)?;
        let actual = tree.kind(id);
        if actual != expected {
            return Err(SelectionError::KindMismatch {
                key: key.to_string(),
                expected,
                actual,
            });
        }
        Ok(id)
    }

    /// All nodes captured under `key`, asserting each one's kind.
    pub fn nodes_of_kind(
        &self,
        tree: &Tree,
        key: &str,
        expected: NodeKind,
    ) -> Result<Vec<NodeId>, SelectionError> {
        let ids = self.nodes(key)?;
        for &id in &ids {
            let actual = tree.kind(id);
            if actual != expected {
                return Err(SelectionError::KindMismatch {
                    key: key.to_string(),
                    expected,
                    actual,
                });
            }
        }
        Ok(ids)
    }

    // Typed getters for the kinds callbacks reach for most. These are the
    // only read path a callback should use to obtain matched sub-nodes.

    pub fn ident(&self, tree: &Tree, key: &str) -> Result<NodeId, SelectionError> {
        self.of_kind(tree, key, NodeKind::Ident)
    }

    pub fn basic_lit(&self, tree: &Tree, key: &str) -> Result<NodeId, SelectionError> {
        self.of_kind(tree, key, NodeKind::BasicLit)
    }

    pub fn call_expr(&self, tree: &Tree, key: &str) -> Result<NodeId, SelectionError> {
        self.of_kind(tree, key, NodeKind::CallExpr)
    }

    pub fn expr_stmt(&self, tree: &Tree, key: &str) -> Result<NodeId, SelectionError> {
        self.of_kind(tree, key, NodeKind::ExprStmt)
    }

    pub fn block(&self, tree: &Tree, key: &str) -> Result<NodeId, SelectionError> {
        self.of_kind(tree, key, NodeKind::Block)
    }

    pub fn if_stmt(&self, tree: &Tree, key: &str) -> Result<NodeId, SelectionError> {
        self.of_kind(tree, key, NodeKind::IfStmt)
    }

    pub fn import_specs(&self, tree: &Tree, key: &str) -> Result<Vec<NodeId>, SelectionError> {
        self.nodes_of_kind(tree, key, NodeKind::ImportSpec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::condition::{any_node, any_nodes, kind};
    use crate::pattern::shape::ident;
    use crate::syntax::LitKind;

    #[test]
    fn select_records_on_success() {
        let mut tree = Tree::new();
        let id = tree.new_ident("logrus");
        let sel = Selections::new();
        let cond = sel.select(ident("logrus"), "pkg");
        assert!(cond(&tree, Some(id)));
        assert_eq!(sel.node("pkg").unwrap(), id);
    }

    #[test]
    fn select_leaves_store_untouched_on_failure() {
        let mut tree = Tree::new();
        let id = tree.new_ident("other");
        let sel = Selections::new();
        let cond = sel.select(ident("logrus"), "pkg");
        assert!(!cond(&tree, Some(id)));
        assert_eq!(
            sel.node("pkg").unwrap_err(),
            SelectionError::Missing("pkg".to_string())
        );
    }

    #[test]
    fn failed_reselect_keeps_last_successful_capture() {
        let mut tree = Tree::new();
        let good = tree.new_ident("logrus");
        let bad = tree.new_ident("other");
        let sel = Selections::new();
        let cond = sel.select(ident("logrus"), "pkg");
        assert!(cond(&tree, Some(good)));
        assert!(!cond(&tree, Some(bad)));
        // The failed attempt must not half-write anything.
        assert_eq!(sel.node("pkg").unwrap(), good);
    }

    #[test]
    fn reselect_overwrites() {
        let mut tree = Tree::new();
        let a = tree.new_ident("x");
        let b = tree.new_ident("x");
        let sel = Selections::new();
        let cond = sel.select(ident("x"), "v");
        assert!(cond(&tree, Some(a)));
        assert!(cond(&tree, Some(b)));
        assert_eq!(sel.node("v").unwrap(), b);
    }

    #[test]
    fn select_on_absent_field_records_nothing() {
        let tree = Tree::new();
        let sel = Selections::new();
        let cond = sel.select(any_node(), "maybe");
        assert!(cond(&tree, None));
        assert!(matches!(
            sel.node("maybe"),
            Err(SelectionError::Missing(_))
        ));
    }

    #[test]
    fn clones_share_the_same_store() {
        let mut tree = Tree::new();
        let id = tree.new_ident("x");
        let sel = Selections::new();
        let handle = sel.clone();
        let cond = sel.select(ident("x"), "v");
        assert!(cond(&tree, Some(id)));
        assert_eq!(handle.node("v").unwrap(), id);
    }

    #[test]
    fn select_nodes_preserves_order() {
        let mut tree = Tree::new();
        let a = tree.new_ident("a");
        let b = tree.new_ident("b");
        let sel = Selections::new();
        let cond = sel.select_nodes(any_nodes(), "all");
        assert!(cond(&tree, &[a, b]));
        assert_eq!(sel.nodes("all").unwrap(), vec![a, b]);
    }

    #[test]
    fn typed_getter_rejects_wrong_kind() {
        let mut tree = Tree::new();
        let lit = tree.new_basic_lit(LitKind::Int, "1");
        let sel = Selections::new();
        let cond = sel.select(kind(NodeKind::BasicLit), "n");
        assert!(cond(&tree, Some(lit)));
        let err = sel.ident(&tree, "n").unwrap_err();
        assert_eq!(
            err,
            SelectionError::KindMismatch {
                key: "n".to_string(),
                expected: NodeKind::Ident,
                actual: NodeKind::BasicLit,
            }
        );
        assert!(sel.basic_lit(&tree, "n").is_ok());
    }

    #[test]
    fn missing_key_fails_loudly() {
        let tree = Tree::new();
        let sel = Selections::new();
        assert!(matches!(
            sel.ident(&tree, "never"),
            Err(SelectionError::Missing(_))
        ));
        assert!(matches!(
            sel.nodes("never"),
            Err(SelectionError::Missing(_))
        ));
    }

    #[test]
    fn nodes_of_kind_checks_every_element() {
        let mut tree = Tree::new();
        let a = tree.new_ident("a");
        let lit = tree.new_basic_lit(LitKind::Int, "1");
        let sel = Selections::new();
        let cond = sel.select_nodes(any_nodes(), "mixed");
        assert!(cond(&tree, &[a, lit]));
        assert!(sel.nodes_of_kind(&tree, "mixed", NodeKind::Ident).is_err());
    }

    #[test]
    fn error_messages_name_the_key() {
        let err = SelectionError::Missing("p1".to_string());
        assert_eq!(err.to_string(), "no node captured under key \"p1\"");
        let err = SelectionError::KindMismatch {
            key: "m".to_string(),
            expected: NodeKind::Ident,
            actual: NodeKind::CallExpr,
        };
        assert_eq!(err.to_string(), "capture \"m\" is a CallExpr, expected Ident");
    }
}
