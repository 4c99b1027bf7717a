//! Per-path risk metrics.
//!
//! Pure functions of (path, graph): success probability models "must
//! compromise every hop", the risk index additionally rewards short
//! routes to valuable assets.

use serde::{Deserialize, Serialize};

use crate::algorithms::RawPath;
use crate::graph::IndexedGraph;

/// Derived, read-only metrics for one path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathMetrics {
    /// Product of node vulnerabilities along the path.
    pub success_probability: f64,
    /// Arithmetic mean of node vulnerabilities.
    pub average_vulnerability: f64,
    /// Maximum node importance on the path (worst-case exposure).
    pub max_importance: f64,
    /// success_probability × max_importance / sqrt(path_length).
    pub risk_index: f64,
    /// Number of nodes on the path.
    pub path_length: usize,
}

impl PathMetrics {
    fn zero() -> Self {
        Self {
            success_probability: 0.0,
            average_vulnerability: 0.0,
            max_importance: 0.0,
            risk_index: 0.0,
            path_length: 0,
        }
    }
}

/// Compute metrics for a path. Empty or unreachable paths score zero
/// across the board.
pub fn compute_metrics(path: &RawPath, graph: &IndexedGraph) -> PathMetrics {
    if path.node_indices.is_empty() || !path.is_reachable() {
        return PathMetrics::zero();
    }

    let mut success_probability = 1.0;
    let mut vulnerability_sum = 0.0;
    let mut max_importance: f64 = 0.0;

    for &index in &path.node_indices {
        let node = &graph.nodes[index];
        success_probability *= node.vulnerability;
        vulnerability_sum += node.vulnerability;
        max_importance = max_importance.max(node.importance);
    }

    let path_length = path.node_indices.len();
    let risk_index = success_probability * max_importance / (path_length as f64).sqrt();

    PathMetrics {
        success_probability,
        average_vulnerability: vulnerability_sum / path_length as f64,
        max_importance,
        risk_index,
        path_length,
    }
}
