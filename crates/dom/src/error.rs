use std::result::Result as StdResult;

use thiserror::Error;

use crate::NodeId;

/// Convenient result type for document operations.
pub type Result<T> = StdResult<T, Error>;

/// Errors produced by document tree operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The node id does not refer to a live node (never created, or destroyed).
    #[error("no such node: {0:?}")]
    NoSuchNode(NodeId),

    /// Attaching `child` under `parent` would create a cycle.
    #[error("cannot append {child:?} under {parent:?}: child is an ancestor of parent")]
    Hierarchy {
        /// Intended parent.
        parent: NodeId,
        /// Node that was to be attached.
        child: NodeId,
    },

    /// A selector string could not be parsed.
    #[error("invalid selector: {0:?}")]
    Selector(String),
}
