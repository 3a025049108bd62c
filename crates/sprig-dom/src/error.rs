use thiserror::Error;

use crate::NodeId;

/// Errors raised by tree queries and mutations.
///
/// Every variant is raised before the tree is touched, so a failed call
/// leaves the tree exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// `before`/`after`/`detach` on a node without a parent.
    #[error("node has no parent")]
    NoParent,

    /// A node is missing from its own parent's children.
    #[error("node is not among its parent's children")]
    NodeNotFound,

    /// Insertion index outside `0..=len`.
    #[error("insert position {position} is invalid, expected an integer between 0 and {len}")]
    InvalidPosition {
        /// The rejected index.
        position: usize,
        /// Current number of children.
        len: usize,
    },

    /// Attribute, style or child mutation on a node kind that has none.
    #[error("cannot {operation} on {target}")]
    UnsupportedOperation {
        /// What was attempted, e.g. `"set attributes"`.
        operation: &'static str,
        /// `#text`, `#fragment`, or `<tag>` for void elements.
        target: String,
    },

    /// A name or argument that cannot be represented in the tree.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An id that does not belong to this tree.
    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),
}
