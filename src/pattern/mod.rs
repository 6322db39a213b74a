//! Structural pattern matching over the syntax tree.
//!
//! A pattern is a chain of [`NodeCondition`]s. During one pre-order walk,
//! every visited node is fed to every registered [`Matcher`]; a matcher
//! advances its cursor while consecutive visits satisfy its chain and fires
//! its callback when the chain completes. Conditions built through
//! [`Selections`] capture the ids of the nodes they accepted, so the
//! callback can mutate exactly the matched locations.

pub mod condition;
pub mod matcher;
pub mod selection;
pub mod shape;
pub mod walk;

pub use condition::{
    NodeCondition, NodesCondition, all_of, any_node, any_nodes, any_of, first, kind, last, not,
    sequence,
};
pub use matcher::{MatchHook, Matcher};
pub use selection::{SelectionError, Selections};
pub use walk::{walk, walk_from};
