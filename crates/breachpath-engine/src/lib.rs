//! breachpath-engine: K-shortest attack path computation over graph
//! snapshots.
//!
//! Takes an in-memory graph snapshot from the embedding front end,
//! builds an indexed adjacency view, runs Dijkstra / Yen's algorithm,
//! scores each route, and returns ranked (path, metrics) pairs. One
//! analysis runs to completion synchronously; all search state is
//! request-local and the caller's snapshot is never mutated.

pub mod algorithms;
pub mod error;
pub mod graph;
pub mod metrics;
pub mod types;

pub use error::EngineError;
pub use types::{AnalysisRequest, AnalysisResult, GraphStats, RankedPath};

use chrono::Utc;
use uuid::Uuid;

use breachpath_core::{EngineConfig, GraphSnapshot};

use crate::graph::IndexedGraph;

/// The attack path analysis engine.
pub struct AnalysisEngine {
    config: EngineConfig,
}

impl AnalysisEngine {
    /// Create an engine with default configuration.
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }

    /// Create an engine with explicit configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Rank up to K attack routes for one request.
    ///
    /// Orchestrates: normalize snapshot → build indexed graph →
    /// validate → Yen's K shortest paths → metrics → translate
    /// indices back to node ids. An unreachable goal produces an
    /// empty path list, not an error.
    pub fn analyze(
        &self,
        snapshot: &GraphSnapshot,
        request: &AnalysisRequest,
    ) -> error::Result<AnalysisResult> {
        let started = std::time::Instant::now();

        let node_penalty = request
            .node_penalty
            .unwrap_or(self.config.default_node_penalty);
        let k = request.k.unwrap_or(self.config.default_k);

        if node_penalty < 0.0 {
            return Err(EngineError::NegativeNodePenalty {
                value: node_penalty,
            });
        }
        if request.start == request.goal {
            return Err(EngineError::SameStartAndGoal {
                node_id: request.start.clone(),
            });
        }

        let mut snapshot = snapshot.clone();
        let normalize_stats = snapshot.normalize();
        if snapshot.nodes.is_empty() {
            return Err(EngineError::EmptyGraph);
        }

        let graph = IndexedGraph::build(&snapshot, node_penalty);

        let start = graph
            .resolve(&request.start)
            .ok_or_else(|| EngineError::NodeNotFound {
                node_id: request.start.clone(),
            })?;
        let goal = graph
            .resolve(&request.goal)
            .ok_or_else(|| EngineError::NodeNotFound {
                node_id: request.goal.clone(),
            })?;

        let raw_paths = algorithms::k_shortest_paths(&graph, start, goal, k);

        let paths: Vec<RankedPath> = raw_paths
            .iter()
            .enumerate()
            .map(|(i, raw)| RankedPath {
                rank: i + 1,
                node_ids: raw
                    .node_indices
                    .iter()
                    .map(|&idx| graph.nodes[idx].id.clone())
                    .collect(),
                cost: raw.cost,
                metrics: metrics::compute_metrics(raw, &graph),
            })
            .collect();

        let computation_ms = started.elapsed().as_millis() as u64;
        tracing::info!(
            start = %request.start,
            goal = %request.goal,
            k,
            found = paths.len(),
            computation_ms,
            "analysis complete"
        );

        Ok(AnalysisResult {
            id: Uuid::new_v4(),
            paths,
            graph_stats: GraphStats {
                total_nodes: graph.node_count(),
                total_edges: graph.edge_count(),
                dropped_nodes: normalize_stats.dropped_nodes,
                dropped_edges: normalize_stats.dropped_edges,
                entry_candidates: graph.entry_candidates().len(),
            },
            computed_at: Utc::now(),
            computation_ms,
        })
    }

    /// Compute only the single cheapest route between two nodes.
    pub fn shortest(
        &self,
        snapshot: &GraphSnapshot,
        start: &str,
        goal: &str,
        node_penalty: f64,
    ) -> error::Result<Option<RankedPath>> {
        let request = AnalysisRequest {
            start: start.to_string(),
            goal: goal.to_string(),
            node_penalty: Some(node_penalty),
            k: Some(1),
        };
        let result = self.analyze(snapshot, &request)?;
        Ok(result.paths.into_iter().next())
    }

    /// Engine configuration in effect.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}
