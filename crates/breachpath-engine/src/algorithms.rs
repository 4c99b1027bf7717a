//! Path-search algorithms: Dijkstra shortest path with exclusions and
//! Yen's K shortest loopless paths.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use crate::graph::IndexedGraph;

/// A raw path through the indexed graph.
///
/// The unreachable sentinel is an empty index sequence with infinite
/// cost; unreachability is a value, never an error.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPath {
    /// Node indices from start to goal, inclusive.
    pub node_indices: Vec<usize>,
    /// Sum of effective weights along consecutive index pairs.
    pub cost: f64,
}

impl RawPath {
    /// The "no path exists" sentinel.
    pub fn unreachable() -> Self {
        Self {
            node_indices: Vec::new(),
            cost: f64::INFINITY,
        }
    }

    pub fn is_reachable(&self) -> bool {
        self.cost.is_finite()
    }
}

/// Single-source/single-target Dijkstra over non-negative weights.
///
/// `excluded_edges` holds (from, to) index pairs skipped during
/// relaxation; `excluded_nodes` are treated as absent entirely. Both
/// exist for the spur searches of Yen's algorithm and are empty for a
/// plain shortest-path query. Exits as soon as the goal is settled.
pub fn shortest_path(
    graph: &IndexedGraph,
    start: usize,
    goal: usize,
    excluded_edges: &HashSet<(usize, usize)>,
    excluded_nodes: &HashSet<usize>,
) -> RawPath {
    let n = graph.node_count();
    if start >= n || goal >= n || excluded_nodes.contains(&start) {
        return RawPath::unreachable();
    }

    let mut dist = vec![f64::INFINITY; n];
    let mut prev: Vec<Option<usize>> = vec![None; n];
    let mut visited = vec![false; n];

    dist[start] = 0.0;

    let mut heap = BinaryHeap::new();
    heap.push(DijkstraState {
        cost: 0.0,
        node: start,
    });

    while let Some(DijkstraState { cost, node }) = heap.pop() {
        if node == goal {
            break;
        }

        if visited[node] {
            continue;
        }
        visited[node] = true;

        if cost > dist[node] {
            continue;
        }

        for entry in &graph.adjacency[node] {
            if excluded_nodes.contains(&entry.target) {
                continue;
            }
            if excluded_edges.contains(&(node, entry.target)) {
                continue;
            }

            let new_dist = dist[node] + entry.weight;
            if new_dist < dist[entry.target] {
                dist[entry.target] = new_dist;
                prev[entry.target] = Some(node);
                heap.push(DijkstraState {
                    cost: new_dist,
                    node: entry.target,
                });
            }
        }
    }

    if dist[goal].is_infinite() {
        return RawPath::unreachable();
    }

    let mut node_indices = vec![goal];
    let mut current = goal;
    while let Some(parent) = prev[current] {
        node_indices.push(parent);
        current = parent;
    }
    node_indices.reverse();

    RawPath {
        node_indices,
        cost: dist[goal],
    }
}

/// Yen's algorithm: up to `k` loopless paths from `start` to `goal`,
/// pairwise distinct by node sequence, in non-decreasing cost order.
///
/// Each iteration branches off the previous accepted path at every
/// spur position: edges already taken from an identical root prefix
/// are excluded so accepted paths cannot be regenerated, and the root
/// nodes strictly before the spur node are excluded so no candidate
/// revisits them. A spur search runs over this restricted view, but a
/// candidate's cost is always recomputed against the unmodified
/// adjacency — the restrictions constrain the search, not the graph.
///
/// Among equal-cost candidates, selection is stable by discovery
/// order. `k == 0` or a disconnected start/goal yields an empty list.
pub fn k_shortest_paths(
    graph: &IndexedGraph,
    start: usize,
    goal: usize,
    k: usize,
) -> Vec<RawPath> {
    if k == 0 {
        return Vec::new();
    }

    let no_edges = HashSet::new();
    let no_nodes = HashSet::new();

    let first = shortest_path(graph, start, goal, &no_edges, &no_nodes);
    if !first.is_reachable() {
        return Vec::new();
    }

    let mut accepted = vec![first];
    let mut pool: Vec<RawPath> = Vec::new();

    while accepted.len() < k {
        let prev_path = accepted[accepted.len() - 1].clone();

        for i in 0..prev_path.node_indices.len() - 1 {
            let spur_node = prev_path.node_indices[i];
            let root = &prev_path.node_indices[..=i];

            // Forbid every edge an accepted path with this exact root
            // prefix takes out of the spur node.
            let mut excluded_edges = HashSet::new();
            for path in &accepted {
                if path.node_indices.len() > i + 1 && path.node_indices[..=i] == *root {
                    excluded_edges.insert((path.node_indices[i], path.node_indices[i + 1]));
                }
            }

            // Forbid revisiting root nodes before the spur node.
            let excluded_nodes: HashSet<usize> = root[..i].iter().copied().collect();

            let spur_path =
                shortest_path(graph, spur_node, goal, &excluded_edges, &excluded_nodes);
            if !spur_path.is_reachable() {
                continue;
            }

            // Splice root (minus the spur node itself) with the spur path.
            let mut candidate: Vec<usize> = root[..i].to_vec();
            candidate.extend_from_slice(&spur_path.node_indices);

            // True cost comes from the original adjacency, not the
            // exclusion-restricted search.
            let cost = graph.path_cost(&candidate);
            if !cost.is_finite() {
                continue;
            }

            if pool.iter().any(|p| p.node_indices == candidate) {
                continue;
            }
            pool.push(RawPath {
                node_indices: candidate,
                cost,
            });
        }

        if pool.is_empty() {
            break;
        }

        // Stable sort keeps discovery order among equal costs.
        pool.sort_by(|a, b| a.cost.partial_cmp(&b.cost).unwrap_or(Ordering::Equal));
        accepted.push(pool.remove(0));
    }

    accepted
}

/// State for Dijkstra's priority queue (min-heap by cost).
#[derive(Debug, Clone, PartialEq)]
struct DijkstraState {
    cost: f64,
    node: usize,
}

impl Eq for DijkstraState {}

impl Ord for DijkstraState {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse for min-heap (BinaryHeap is a max-heap).
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for DijkstraState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use breachpath_core::{EdgeSpec, GraphSnapshot, NodeSpec};

    fn node(id: &str, vuln: f64, importance: f64) -> NodeSpec {
        NodeSpec {
            id: id.to_string(),
            label: id.to_string(),
            node_type: "node".to_string(),
            vulnerability: vuln,
            importance,
        }
    }

    fn edge(source: &str, target: &str, weight: f64) -> EdgeSpec {
        EdgeSpec {
            source: source.to_string(),
            target: target.to_string(),
            weight,
        }
    }

    fn build(nodes: Vec<NodeSpec>, edges: Vec<EdgeSpec>, penalty: f64) -> IndexedGraph {
        IndexedGraph::build(
            &GraphSnapshot {
                meta: serde_json::Value::Null,
                nodes,
                edges,
            },
            penalty,
        )
    }

    /// The worked three-node chain:
    ///
    /// ```text
    /// A --1.0--> B --1.2--> C
    /// ```
    fn chain_graph(penalty: f64) -> IndexedGraph {
        build(
            vec![
                node("A", 0.3, 0.1),
                node("B", 0.6, 0.4),
                node("C", 0.5, 0.9),
            ],
            vec![edge("A", "B", 1.0), edge("B", "C", 1.2)],
            penalty,
        )
    }

    /// A diamond with two distinct routes and a longer detour:
    ///
    /// ```text
    /// 0 → 1 → 3   (cost 2.0)
    /// 0 → 2 → 3   (cost 3.0)
    /// 0 → 1 → 2 → 3  (cost 4.0)
    /// ```
    fn diamond_graph() -> IndexedGraph {
        build(
            vec![
                node("s", 0.5, 0.5),
                node("a", 0.5, 0.5),
                node("b", 0.5, 0.5),
                node("t", 0.5, 0.5),
            ],
            vec![
                edge("s", "a", 1.0),
                edge("s", "b", 1.0),
                edge("a", "t", 1.0),
                edge("a", "b", 1.0),
                edge("b", "t", 2.0),
            ],
            0.0,
        )
    }

    #[test]
    fn dijkstra_chain() {
        let graph = chain_graph(0.0);
        let path = shortest_path(&graph, 0, 2, &HashSet::new(), &HashSet::new());

        assert_eq!(path.node_indices, vec![0, 1, 2]);
        assert!((path.cost - 2.2).abs() < 1e-9);
    }

    #[test]
    fn dijkstra_node_penalty_changes_cost() {
        // penalty 1: A→B = 1.0 + (1-0.6) = 1.4, B→C = 1.2 + (1-0.5) = 1.7
        let graph = chain_graph(1.0);
        let path = shortest_path(&graph, 0, 2, &HashSet::new(), &HashSet::new());

        assert_eq!(path.node_indices, vec![0, 1, 2]);
        assert!((path.cost - 3.1).abs() < 1e-9);
    }

    #[test]
    fn dijkstra_unreachable_is_sentinel_not_error() {
        let graph = chain_graph(0.0);
        let path = shortest_path(&graph, 2, 0, &HashSet::new(), &HashSet::new());

        assert!(!path.is_reachable());
        assert!(path.node_indices.is_empty());
        assert!(path.cost.is_infinite());
    }

    #[test]
    fn dijkstra_respects_excluded_edges() {
        let graph = diamond_graph();
        let mut excluded = HashSet::new();
        excluded.insert((1, 3)); // cut a→t

        let path = shortest_path(&graph, 0, 3, &excluded, &HashSet::new());
        assert_eq!(path.node_indices, vec![0, 2, 3]);
        assert!((path.cost - 3.0).abs() < 1e-9);
    }

    #[test]
    fn dijkstra_respects_excluded_nodes() {
        let graph = diamond_graph();
        let mut excluded = HashSet::new();
        excluded.insert(1); // node a unusable

        let path = shortest_path(&graph, 0, 3, &HashSet::new(), &excluded);
        assert_eq!(path.node_indices, vec![0, 2, 3]);
    }

    #[test]
    fn dijkstra_excluded_start_unreachable() {
        let graph = diamond_graph();
        let mut excluded = HashSet::new();
        excluded.insert(0);

        let path = shortest_path(&graph, 0, 3, &HashSet::new(), &excluded);
        assert!(!path.is_reachable());
    }

    #[test]
    fn yen_orders_distinct_loopless_paths() {
        let graph = diamond_graph();
        let paths = k_shortest_paths(&graph, 0, 3, 5);

        assert_eq!(paths.len(), 3);
        assert_eq!(paths[0].node_indices, vec![0, 1, 3]);
        assert_eq!(paths[1].node_indices, vec![0, 2, 3]);
        assert_eq!(paths[2].node_indices, vec![0, 1, 2, 3]);

        // Non-decreasing cost, no duplicate sequences, loopless.
        for pair in paths.windows(2) {
            assert!(pair[0].cost <= pair[1].cost);
            assert_ne!(pair[0].node_indices, pair[1].node_indices);
        }
        for path in &paths {
            let unique: HashSet<usize> = path.node_indices.iter().copied().collect();
            assert_eq!(unique.len(), path.node_indices.len());
        }
    }

    #[test]
    fn yen_cost_matches_original_adjacency() {
        let graph = diamond_graph();
        let paths = k_shortest_paths(&graph, 0, 3, 5);

        for path in &paths {
            assert!((path.cost - graph.path_cost(&path.node_indices)).abs() < 1e-9);
        }
    }

    #[test]
    fn yen_returns_fewer_when_fewer_exist() {
        // Only one route exists in the chain; K=3 must not invent more.
        let graph = chain_graph(0.0);
        let paths = k_shortest_paths(&graph, 0, 2, 3);

        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].node_indices, vec![0, 1, 2]);
    }

    #[test]
    fn yen_disconnected_yields_empty() {
        let graph = chain_graph(0.0);
        let paths = k_shortest_paths(&graph, 2, 0, 3);
        assert!(paths.is_empty());
    }

    #[test]
    fn yen_k_zero_yields_empty() {
        let graph = diamond_graph();
        let paths = k_shortest_paths(&graph, 0, 3, 0);
        assert!(paths.is_empty());
    }

    #[test]
    fn yen_k_one_is_plain_shortest() {
        let graph = diamond_graph();
        let paths = k_shortest_paths(&graph, 0, 3, 1);

        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].node_indices, vec![0, 1, 3]);
    }

    #[test]
    fn yen_is_deterministic() {
        let graph = diamond_graph();
        let first = k_shortest_paths(&graph, 0, 3, 5);
        let second = k_shortest_paths(&graph, 0, 3, 5);
        assert_eq!(first, second);
    }

    #[test]
    fn yen_parallel_routes_all_found() {
        // Three fully disjoint routes of increasing cost.
        let graph = build(
            vec![
                node("s", 0.5, 0.5),
                node("x", 0.5, 0.5),
                node("y", 0.5, 0.5),
                node("z", 0.5, 0.5),
                node("t", 0.5, 0.5),
            ],
            vec![
                edge("s", "x", 1.0),
                edge("x", "t", 1.0),
                edge("s", "y", 1.5),
                edge("y", "t", 1.5),
                edge("s", "z", 2.0),
                edge("z", "t", 2.0),
            ],
            0.0,
        );

        let paths = k_shortest_paths(&graph, 0, 4, 10);
        assert_eq!(paths.len(), 3);
        assert!((paths[0].cost - 2.0).abs() < 1e-9);
        assert!((paths[1].cost - 3.0).abs() < 1e-9);
        assert!((paths[2].cost - 4.0).abs() < 1e-9);
    }
}
