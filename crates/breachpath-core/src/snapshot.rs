//! Graph snapshot schema: the in-memory shape handed to the engine
//! by the embedding front end (editor, importer, API layer).
//!
//! A snapshot is a plain node/edge list keyed by string ids. It is
//! normalized once at ingestion: scores are clamped into [0, 1],
//! negative weights are clamped to zero, duplicate node ids and
//! dangling edges are dropped rather than errored.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Maximum number of nodes accepted on import.
pub const MAX_NODES: usize = 1000;
/// Maximum number of edges accepted on import.
pub const MAX_EDGES: usize = 5000;
/// Maximum import payload size in bytes (5 MiB).
pub const MAX_PAYLOAD_BYTES: usize = 5 * 1024 * 1024;

/// An asset or entity in the graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSpec {
    /// Unique, stable string key.
    pub id: String,
    /// Display label. Falls back to the id during normalization.
    #[serde(default)]
    pub label: String,
    /// Free-form category tag: "server", "device", "gateway", etc.
    #[serde(default = "default_node_type", rename = "type")]
    pub node_type: String,
    /// Ease of compromise, 0.0 (hardened) to 1.0 (trivial).
    #[serde(default = "default_score", alias = "vuln")]
    pub vulnerability: f64,
    /// Asset value, 0.0 to 1.0.
    #[serde(default = "default_score")]
    pub importance: f64,
}

/// A directed connection between two nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub source: String,
    pub target: String,
    /// Non-negative base traversal cost.
    #[serde(default = "default_weight")]
    pub weight: f64,
}

/// A complete graph snapshot as supplied by the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphSnapshot {
    /// Free-form metadata (title, description, ...) passed through untouched.
    #[serde(default)]
    pub meta: serde_json::Value,
    #[serde(default)]
    pub nodes: Vec<NodeSpec>,
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
}

/// Counts of entries removed during normalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    pub dropped_nodes: usize,
    pub dropped_edges: usize,
}

impl GraphSnapshot {
    /// Normalize the snapshot in place.
    ///
    /// - vulnerability and importance are clamped into [0, 1]
    /// - negative edge weights are clamped to 0.0
    /// - empty labels fall back to the node id
    /// - duplicate node ids are dropped (first occurrence wins)
    /// - edges referencing unknown node ids are dropped
    pub fn normalize(&mut self) -> NormalizeStats {
        let mut stats = NormalizeStats::default();

        let mut seen: HashSet<String> = HashSet::with_capacity(self.nodes.len());
        self.nodes.retain_mut(|node| {
            if !seen.insert(node.id.clone()) {
                tracing::debug!(id = %node.id, "dropping duplicate node id");
                stats.dropped_nodes += 1;
                return false;
            }
            node.vulnerability = clamp01(node.vulnerability);
            node.importance = clamp01(node.importance);
            if node.label.is_empty() {
                node.label = node.id.clone();
            }
            true
        });

        self.edges.retain_mut(|edge| {
            if !seen.contains(&edge.source) || !seen.contains(&edge.target) {
                tracing::debug!(
                    source = %edge.source,
                    target = %edge.target,
                    "dropping edge with unresolved endpoint"
                );
                stats.dropped_edges += 1;
                return false;
            }
            edge.weight = edge.weight.max(0.0);
            true
        });

        stats
    }

    /// Parse a snapshot from a JSON string, enforcing import limits.
    pub fn from_json_str(payload: &str) -> crate::error::Result<Self> {
        if payload.len() > MAX_PAYLOAD_BYTES {
            return Err(crate::SnapshotError::PayloadTooLarge {
                bytes: payload.len(),
                max: MAX_PAYLOAD_BYTES,
            });
        }

        let snapshot: GraphSnapshot = serde_json::from_str(payload)?;

        if snapshot.nodes.len() > MAX_NODES {
            return Err(crate::SnapshotError::TooManyNodes {
                count: snapshot.nodes.len(),
                max: MAX_NODES,
            });
        }
        if snapshot.edges.len() > MAX_EDGES {
            return Err(crate::SnapshotError::TooManyEdges {
                count: snapshot.edges.len(),
                max: MAX_EDGES,
            });
        }

        Ok(snapshot)
    }

    /// Read and parse a snapshot from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> crate::error::Result<Self> {
        let payload = std::fs::read_to_string(path)?;
        Self::from_json_str(&payload)
    }

    /// Serialize the snapshot back to pretty-printed JSON for export.
    pub fn to_json_string(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Clamp a score into [0, 1].
pub fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

fn default_score() -> f64 {
    0.5
}

fn default_weight() -> f64 {
    1.0
}

fn default_node_type() -> String {
    "node".to_string()
}
