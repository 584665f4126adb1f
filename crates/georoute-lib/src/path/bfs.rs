use std::collections::VecDeque;

use super::reconstruct_path;
use crate::graph::{Graph, NodeIndex};

/// Find the path with the fewest hops between `start` and `goal`, ignoring
/// edge weights.
pub fn find_route_bfs(
    graph: &Graph,
    start: NodeIndex,
    goal: NodeIndex,
) -> Option<Vec<NodeIndex>> {
    if start >= graph.len() || goal >= graph.len() {
        return None;
    }
    if start == goal {
        return Some(vec![start]);
    }

    let mut parents: Vec<Option<NodeIndex>> = vec![None; graph.len()];
    let mut seen = vec![false; graph.len()];
    let mut queue = VecDeque::new();

    seen[start] = true;
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for edge in graph.neighbours(current) {
            let next = edge.target;
            if !matches!(seen.get(next), Some(false)) {
                continue;
            }

            seen[next] = true;
            parents[next] = Some(current);
            if next == goal {
                return Some(reconstruct_path(&parents, start, goal));
            }
            queue.push_back(next);
        }
    }

    None
}

/// Every node reachable from `start`, in breadth-first discovery order
/// (`start` first).
pub fn reachable_from(graph: &Graph, start: NodeIndex) -> Vec<NodeIndex> {
    if start >= graph.len() {
        return Vec::new();
    }

    let mut seen = vec![false; graph.len()];
    let mut order = vec![start];
    let mut cursor = 0;
    seen[start] = true;

    while let Some(&current) = order.get(cursor) {
        cursor += 1;
        for edge in graph.neighbours(current) {
            if matches!(seen.get(edge.target), Some(false)) {
                seen[edge.target] = true;
                order.push(edge.target);
            }
        }
    }

    order
}
