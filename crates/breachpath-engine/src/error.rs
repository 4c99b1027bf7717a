//! Error types for the breachpath-engine crate.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] breachpath_core::SnapshotError),

    #[error("Node not found: {node_id}")]
    NodeNotFound { node_id: String },

    #[error("Start and goal must differ: {node_id}")]
    SameStartAndGoal { node_id: String },

    #[error("Node penalty must be non-negative, got {value}")]
    NegativeNodePenalty { value: f64 },

    #[error("Empty graph: snapshot contains no nodes")]
    EmptyGraph,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
