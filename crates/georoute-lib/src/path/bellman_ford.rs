use tracing::{debug, warn};

use super::ShortestPaths;
use crate::graph::{Graph, NodeIndex};

/// Result of a Bellman-Ford run.
#[derive(Debug, Clone, PartialEq)]
pub enum BellmanFordOutcome {
    /// Distances are well defined.
    Distances(ShortestPaths),
    /// A negative-weight cycle is reachable from the source, so distances are
    /// unbounded below and must not be used.
    NegativeCycle,
}

impl BellmanFordOutcome {
    pub fn distances(&self) -> Option<&ShortestPaths> {
        match self {
            BellmanFordOutcome::Distances(paths) => Some(paths),
            BellmanFordOutcome::NegativeCycle => None,
        }
    }

    pub fn has_negative_cycle(&self) -> bool {
        matches!(self, BellmanFordOutcome::NegativeCycle)
    }
}

/// Run Bellman-Ford from `source`, tolerating negative edge weights.
pub fn bellman_ford(graph: &Graph, source: NodeIndex) -> BellmanFordOutcome {
    let mut paths = ShortestPaths::seeded(graph.len(), source);
    if source >= graph.len() {
        return BellmanFordOutcome::Distances(paths);
    }

    let mut passes = 0usize;
    for _ in 1..graph.len() {
        passes += 1;
        if !relax_all(graph, &mut paths) {
            break;
        }
    }

    if relax_all(graph, &mut paths) {
        warn!(source, "negative-weight cycle reachable from source");
        return BellmanFordOutcome::NegativeCycle;
    }

    debug!(source, passes, nodes = graph.len(), "bellman-ford finished");
    BellmanFordOutcome::Distances(paths)
}

/// One relaxation pass over every edge. Returns whether anything improved.
fn relax_all(graph: &Graph, paths: &mut ShortestPaths) -> bool {
    let mut changed = false;
    for (from, edge) in graph.edges() {
        let base = paths.distances[from];
        if base.is_infinite() {
            continue;
        }
        let candidate = base + edge.weight;
        if candidate < paths.distances[edge.target] {
            paths.distances[edge.target] = candidate;
            paths.predecessors[edge.target] = Some(from);
            changed = true;
        }
    }
    changed
}
