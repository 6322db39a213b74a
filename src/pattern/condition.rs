//! Generic conditions over nodes and node lists.
//!
//! Conditions are total: on any node of the wrong shape, or on an absent
//! optional field (`None`), they return `false` rather than failing. The
//! wildcards are the only conditions that accept absent fields — an optional
//! branch that a pattern does not care about must not sink the whole chain.

use crate::syntax::{NodeId, NodeKind, Tree};

/// Predicate over one node. The node is `None` when an optional field the
/// condition is applied to is absent.
pub type NodeCondition = Box<dyn Fn(&Tree, Option<NodeId>) -> bool>;

/// Predicate over an ordered list of nodes.
pub type NodesCondition = Box<dyn Fn(&Tree, &[NodeId]) -> bool>;

/// True iff the node is present and has the given kind. The primitive every
/// shape test is built from.
pub fn kind(k: NodeKind) -> NodeCondition {
    Box::new(move |tree, node| node.is_some_and(|id| tree.kind(id) == k))
}

/// Always true, including on absent fields.
pub fn any_node() -> NodeCondition {
    Box::new(|_, _| true)
}

/// Always true for any node list.
pub fn any_nodes() -> NodesCondition {
    Box::new(|_, _| true)
}

/// True iff every condition accepts the node, evaluated left to right with
/// short-circuiting.
pub fn all_of(conds: Vec<NodeCondition>) -> NodeCondition {
    Box::new(move |tree, node| conds.iter().all(|c| c(tree, node)))
}

/// True iff at least one condition accepts the node.
pub fn any_of(conds: Vec<NodeCondition>) -> NodeCondition {
    Box::new(move |tree, node| conds.iter().any(|c| c(tree, node)))
}

/// Inverts a condition. Note this makes absent fields match whenever the
/// inner condition rejects them.
pub fn not(cond: NodeCondition) -> NodeCondition {
    Box::new(move |tree, node| !cond(tree, node))
}

/// Exact sequence: true iff the list has exactly as many elements as
/// conditions and each position matches.
pub fn sequence(conds: Vec<NodeCondition>) -> NodesCondition {
    Box::new(move |tree, nodes| {
        if nodes.len() != conds.len() {
            return false;
        }
        conds
            .iter()
            .zip(nodes)
            .all(|(c, &id)| c(tree, Some(id)))
    })
}

/// Tests the first element of a list; vacuously true on an empty list.
pub fn first(cond: NodeCondition) -> NodesCondition {
    Box::new(move |tree, nodes| match nodes.first() {
        Some(&id) => cond(tree, Some(id)),
        None => true,
    })
}

/// Tests the last element of a list; vacuously true on an empty list.
pub fn last(cond: NodeCondition) -> NodesCondition {
    Box::new(move |tree, nodes| match nodes.last() {
        Some(&id) => cond(tree, Some(id)),
        None => true,
    })
}
