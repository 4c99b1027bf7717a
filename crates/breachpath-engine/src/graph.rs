//! In-memory indexed graph for the path-search algorithms.
//!
//! Converts a normalized `GraphSnapshot` into a compact adjacency
//! list addressed by dense node indices. The index mapping is rebuilt
//! per analysis request; it is a search-time convenience, not a
//! long-lived identity.

use std::collections::HashMap;

use breachpath_core::snapshot::clamp01;
use breachpath_core::GraphSnapshot;

/// Compact node metadata stored in the indexed graph.
#[derive(Debug, Clone)]
pub struct GraphNode {
    /// Dense index (0..N-1) for O(1) lookup.
    pub index: usize,
    /// Original node id.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Category tag: "server", "device", "gateway", etc.
    pub node_type: String,
    /// Ease of compromise (0.0–1.0).
    pub vulnerability: f64,
    /// Asset value (0.0–1.0).
    pub importance: f64,
}

/// One directed adjacency entry.
#[derive(Debug, Clone)]
pub struct AdjacencyEntry {
    /// Target node index.
    pub target: usize,
    /// Effective traversal cost: base weight plus the node penalty term.
    pub weight: f64,
    /// Opaque edge reference for display ("source->target").
    pub edge_id: String,
}

/// The indexed graph built fresh for each analysis request.
pub struct IndexedGraph {
    /// All nodes, addressed by dense index.
    pub nodes: Vec<GraphNode>,
    /// Adjacency list: `adjacency[i]` = outgoing edges from node `i`.
    pub adjacency: Vec<Vec<AdjacencyEntry>>,
    /// Map from original node id → dense index.
    pub node_index: HashMap<String, usize>,
}

impl IndexedGraph {
    /// Build the indexed graph from a snapshot.
    ///
    /// Effective weight of each edge is
    /// `edge.weight + node_penalty * (1 - target.vulnerability)`:
    /// traversal cost grows with how hard the *destination* is to
    /// compromise. The graph is strictly directed; no reverse edges
    /// are synthesized. Edges with unresolved endpoints are skipped
    /// (normalization drops them upstream, but the builder stays
    /// defensive).
    pub fn build(snapshot: &GraphSnapshot, node_penalty: f64) -> Self {
        let mut node_index = HashMap::with_capacity(snapshot.nodes.len());
        let mut nodes = Vec::with_capacity(snapshot.nodes.len());

        for (i, spec) in snapshot.nodes.iter().enumerate() {
            node_index.insert(spec.id.clone(), i);
            nodes.push(GraphNode {
                index: i,
                id: spec.id.clone(),
                label: spec.label.clone(),
                node_type: spec.node_type.clone(),
                vulnerability: clamp01(spec.vulnerability),
                importance: clamp01(spec.importance),
            });
        }

        let mut adjacency = vec![Vec::new(); nodes.len()];

        for edge in &snapshot.edges {
            if let (Some(&src), Some(&tgt)) = (
                node_index.get(&edge.source),
                node_index.get(&edge.target),
            ) {
                let penalty = node_penalty * (1.0 - nodes[tgt].vulnerability);
                adjacency[src].push(AdjacencyEntry {
                    target: tgt,
                    weight: edge.weight.max(0.0) + penalty,
                    edge_id: format!("{}->{}", edge.source, edge.target),
                });
            }
        }

        Self {
            nodes,
            adjacency,
            node_index,
        }
    }

    /// Resolve a node id to its dense index.
    pub fn resolve(&self, id: &str) -> Option<usize> {
        self.node_index.get(id).copied()
    }

    /// Number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(|edges| edges.len()).sum()
    }

    /// Sum of effective weights along a node index sequence.
    ///
    /// Always evaluated against this (unmodified) adjacency, so costs
    /// computed after an exclusion-constrained search reflect the real
    /// graph. Returns infinity if a consecutive pair has no edge.
    pub fn path_cost(&self, indices: &[usize]) -> f64 {
        let mut total = 0.0;
        for pair in indices.windows(2) {
            match self.adjacency[pair[0]].iter().find(|e| e.target == pair[1]) {
                Some(entry) => total += entry.weight,
                None => return f64::INFINITY,
            }
        }
        total
    }

    /// Likely entry point indices: nodes whose id or type mentions
    /// an external-facing marker.
    pub fn entry_candidates(&self) -> Vec<usize> {
        self.nodes
            .iter()
            .filter(|n| {
                let id = n.id.to_lowercase();
                let node_type = n.node_type.to_lowercase();
                ["ext", "outside", "gateway"]
                    .iter()
                    .any(|marker| id.contains(marker) || node_type.contains(marker))
            })
            .map(|n| n.index)
            .collect()
    }

    /// Index of the highest-importance node, the default attack goal.
    pub fn prime_target(&self) -> Option<usize> {
        self.nodes
            .iter()
            .max_by(|a, b| {
                a.importance
                    .partial_cmp(&b.importance)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|n| n.index)
    }
}
