//! Error types for the editor

use syntree_common::Id;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Tree not found: {0}")]
    TreeNotFound(Id),

    #[error("Node {node_id} not found in tree {tree_id}")]
    NodeNotFound { tree_id: Id, node_id: Id },

    #[error("Invalid tree {tree_id}: {reason}")]
    InvalidTree { tree_id: Id, reason: String },

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// The worklist stopped making progress: these nodes wait on children
    /// that are missing or that (transitively) wait on them
    #[error("Cannot position nodes {0:?}: missing children or a cycle")]
    UnresolvedNodes(Vec<Id>),
}

pub type EditorResult<T> = Result<T, EditorError>;
