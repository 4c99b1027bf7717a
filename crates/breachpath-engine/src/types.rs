//! Request and response types for analysis operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::metrics::PathMetrics;

/// Request to rank attack routes between two nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Start node id.
    pub start: String,
    /// Goal node id. Must differ from `start`.
    pub goal: String,
    /// Node penalty coefficient (≥ 0). If None, uses the configured
    /// default. Front ends clamp this into [0, 2] before submitting.
    pub node_penalty: Option<f64>,
    /// Number of routes to produce. If None, uses the configured
    /// default (3).
    pub k: Option<usize>,
}

/// One ranked route with its metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedPath {
    /// 1-based rank by cost.
    pub rank: usize,
    /// Node id sequence from start to goal.
    pub node_ids: Vec<String>,
    /// Total effective cost.
    pub cost: f64,
    pub metrics: PathMetrics,
}

/// Complete result of one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub id: Uuid,
    /// Ranked routes, cheapest first. Empty when the goal is
    /// unreachable — the caller renders that as "no path".
    pub paths: Vec<RankedPath>,
    pub graph_stats: GraphStats,
    pub computed_at: DateTime<Utc>,
    pub computation_ms: u64,
}

/// Statistics about the graph an analysis ran over.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphStats {
    pub total_nodes: usize,
    pub total_edges: usize,
    /// Duplicate node ids removed during normalization.
    pub dropped_nodes: usize,
    /// Dangling edges removed during normalization.
    pub dropped_edges: usize,
    /// Nodes flagged as likely entry points.
    pub entry_candidates: usize,
}
