use tracing::debug;

use super::queue::MinQueue;
use super::ShortestPaths;
use crate::graph::{Graph, NodeIndex};

/// Run Dijkstra's algorithm from `source` over the whole graph.
///
/// Edge weights must be non-negative; negative weights give silently wrong
/// distances, use [`super::bellman_ford`] for those graphs. Among equally
/// short paths the one whose nodes were queued first wins.
pub fn dijkstra(graph: &Graph, source: NodeIndex) -> ShortestPaths {
    let mut paths = ShortestPaths::seeded(graph.len(), source);
    if source >= graph.len() {
        return paths;
    }

    let mut visited = vec![false; graph.len()];
    let mut queue = MinQueue::new();
    queue.push(source, 0.0);
    let mut settled = 0usize;

    while let Some((node, cost)) = queue.pop() {
        if visited[node] || cost > paths.distances[node] {
            continue;
        }
        visited[node] = true;
        settled += 1;

        for edge in graph.neighbours(node) {
            let next = edge.target;
            if visited.get(next).copied().unwrap_or(true) {
                continue;
            }
            let candidate = cost + edge.weight;
            if candidate < paths.distances[next] {
                paths.distances[next] = candidate;
                paths.predecessors[next] = Some(node);
                queue.push(next, candidate);
            }
        }
    }

    debug!(source, settled, nodes = graph.len(), "dijkstra finished");
    paths
}
