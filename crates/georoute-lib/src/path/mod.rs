//! Single-pair and single-source search over a [`Graph`].
//!
//! This module provides:
//! - [`dijkstra`] - full distance/predecessor maps for non-negative weights
//! - [`bellman_ford`] - the same for signed weights, with negative-cycle detection
//! - [`a_star`] - goal-directed search guided by the geodesic heuristic
//! - [`find_route_bfs`] / [`reachable_from`] - hop-count search and connectivity
//! - [`reconstruct_path`] - predecessor walk shared by all of the above
//!
//! Solvers never fail: unreachable targets show up as infinite distances or
//! empty paths.

mod a_star;
mod bellman_ford;
mod bfs;
mod dijkstra;
pub(crate) mod queue;

pub use a_star::{a_star, AStarOptions};
pub use bellman_ford::{bellman_ford, BellmanFordOutcome};
pub use bfs::{find_route_bfs, reachable_from};
pub use dijkstra::dijkstra;

use crate::graph::NodeIndex;

/// Distances and predecessors from a single source.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPaths {
    pub source: NodeIndex,
    /// Tentative distance per node; `f64::INFINITY` when unreachable.
    pub distances: Vec<f64>,
    pub predecessors: Vec<Option<NodeIndex>>,
}

impl ShortestPaths {
    /// Initial state: everything unreachable except the source at zero.
    pub(crate) fn seeded(node_count: usize, source: NodeIndex) -> Self {
        let mut distances = vec![f64::INFINITY; node_count];
        if let Some(slot) = distances.get_mut(source) {
            *slot = 0.0;
        }
        Self {
            source,
            distances,
            predecessors: vec![None; node_count],
        }
    }

    /// Distance to `node`, infinite when unreachable or unknown.
    pub fn distance(&self, node: NodeIndex) -> f64 {
        self.distances.get(node).copied().unwrap_or(f64::INFINITY)
    }

    pub fn is_reachable(&self, node: NodeIndex) -> bool {
        self.distance(node).is_finite()
    }

    /// Forward path from the source to `target`; empty when unreachable.
    pub fn path_to(&self, target: NodeIndex) -> Vec<NodeIndex> {
        if !self.is_reachable(target) {
            return Vec::new();
        }
        reconstruct_path(&self.predecessors, self.source, target)
    }
}

/// Ordered path with its total cost.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPath {
    pub nodes: Vec<NodeIndex>,
    pub cost: f64,
}

impl SearchPath {
    /// The "no path" value: empty with zero cost.
    pub fn not_found() -> Self {
        Self {
            nodes: Vec::new(),
            cost: 0.0,
        }
    }

    pub fn is_found(&self) -> bool {
        !self.nodes.is_empty()
    }

    pub fn hop_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }
}

/// Walk predecessors from `target` back to `source` and return the path in
/// forward order.
///
/// Returns an empty path when the chain does not end at `source`, including
/// when the predecessor map contains a cycle.
pub fn reconstruct_path(
    predecessors: &[Option<NodeIndex>],
    source: NodeIndex,
    target: NodeIndex,
) -> Vec<NodeIndex> {
    let mut path = Vec::new();
    let mut current = Some(target);
    while let Some(node) = current {
        if path.len() > predecessors.len() {
            return Vec::new();
        }
        path.push(node);
        if node == source {
            path.reverse();
            return path;
        }
        current = predecessors.get(node).copied().flatten();
    }
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reconstructs_forward_order() {
        let predecessors = vec![None, Some(0), Some(1), Some(2)];
        assert_eq!(reconstruct_path(&predecessors, 0, 3), vec![0, 1, 2, 3]);
    }

    #[test]
    fn source_equals_target() {
        assert_eq!(reconstruct_path(&[None, None], 1, 1), vec![1]);
    }

    #[test]
    fn broken_chain_is_empty() {
        let predecessors = vec![None, None, Some(1)];
        assert!(reconstruct_path(&predecessors, 0, 2).is_empty());
    }

    #[test]
    fn chain_to_other_root_is_empty() {
        let predecessors = vec![None, Some(2), None];
        assert!(reconstruct_path(&predecessors, 0, 1).is_empty());
    }

    #[test]
    fn cyclic_predecessors_terminate() {
        let predecessors = vec![None, Some(2), Some(1)];
        assert!(reconstruct_path(&predecessors, 0, 1).is_empty());
    }

    #[test]
    fn unreachable_shortest_paths_yield_empty_path() {
        let paths = ShortestPaths::seeded(3, 0);
        assert!(paths.path_to(2).is_empty());
        assert_eq!(paths.path_to(0), vec![0]);
        assert!(paths.distance(7).is_infinite());
    }
}
