//! breachpath-core: Shared types for the breachpath analysis engine.
//!
//! This crate provides the pieces shared between the engine and any
//! embedding front end:
//! - The graph snapshot schema (nodes, edges, metadata)
//! - Snapshot normalization and JSON import/export with abuse limits
//! - Engine configuration loading
//! - The snapshot error type

pub mod config;
pub mod error;
pub mod snapshot;

pub use config::EngineConfig;
pub use error::SnapshotError;
pub use snapshot::{EdgeSpec, GraphSnapshot, NodeSpec};
