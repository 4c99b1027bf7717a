//! Error types for snapshot ingestion.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Too many nodes: {count} (limit {max})")]
    TooManyNodes { count: usize, max: usize },

    #[error("Too many edges: {count} (limit {max})")]
    TooManyEdges { count: usize, max: usize },

    #[error("Payload too large: {bytes} bytes (limit {max})")]
    PayloadTooLarge { bytes: usize, max: usize },

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SnapshotError>;
