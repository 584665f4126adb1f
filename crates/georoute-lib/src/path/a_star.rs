use tracing::{debug, warn};

use super::queue::MinQueue;
use super::{reconstruct_path, SearchPath};
use crate::graph::{Graph, NodeIndex};

/// Tuning for [`a_star`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AStarOptions {
    /// Maximum number of queue pops before giving up. `None` derives a
    /// ceiling from the graph size.
    pub max_iterations: Option<usize>,
}

impl AStarOptions {
    fn ceiling(&self, graph: &Graph) -> usize {
        self.max_iterations
            .unwrap_or_else(|| 4 * (graph.len() + graph.edge_count()) + 16)
    }
}

/// Run A* from `start` to `goal`.
///
/// The heuristic is the geodesic distance to the goal in the graph's weight
/// unit, which never exceeds the true remaining cost on graphs produced by
/// [`crate::build_graph`]. Nodes without coordinates, and graphs with custom
/// weights, fall back to a zero heuristic. Returns [`SearchPath::not_found`]
/// when the goal is unreachable or the iteration ceiling is hit.
pub fn a_star(
    graph: &Graph,
    start: NodeIndex,
    goal: NodeIndex,
    options: &AStarOptions,
) -> SearchPath {
    if start >= graph.len() || goal >= graph.len() {
        return SearchPath::not_found();
    }
    if start == goal {
        return SearchPath {
            nodes: vec![start],
            cost: 0.0,
        };
    }

    let mut g_score = vec![f64::INFINITY; graph.len()];
    let mut parents: Vec<Option<NodeIndex>> = vec![None; graph.len()];
    let mut open = MinQueue::new();

    g_score[start] = 0.0;
    open.push(start, graph.heuristic(start, goal));

    let ceiling = options.ceiling(graph);
    let mut iterations = 0usize;

    while let Some((node, estimate)) = open.pop() {
        iterations += 1;
        if iterations > ceiling {
            warn!(start, goal, ceiling, "a* iteration ceiling exceeded; treating as no path");
            return SearchPath::not_found();
        }

        let current = g_score[node];
        // Stale entry: the node was re-queued with a better score since.
        if estimate > current + graph.heuristic(node, goal) {
            continue;
        }

        if node == goal {
            debug!(start, goal, iterations, "a* reached goal");
            return SearchPath {
                nodes: reconstruct_path(&parents, start, goal),
                cost: current,
            };
        }

        for edge in graph.neighbours(node) {
            let next = edge.target;
            let Some(&known) = g_score.get(next) else {
                continue;
            };
            let tentative = current + edge.weight;
            if tentative < known {
                g_score[next] = tentative;
                parents[next] = Some(node);
                open.push(next, tentative + graph.heuristic(next, goal));
            }
        }
    }

    debug!(start, goal, iterations, "a* exhausted open set");
    SearchPath::not_found()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Entity, EntitySet};
    use crate::graph::{build_graph, EdgeWeighting, GraphBuildOptions};
    use crate::path::dijkstra;

    fn grid() -> EntitySet {
        EntitySet::new(vec![
            Entity::new("a", 0.0, 0.0),
            Entity::new("b", 0.0, 0.3),
            Entity::new("c", 0.3, 0.3),
            Entity::new("d", 0.3, 0.0),
            Entity::new("e", 0.15, 0.6),
        ])
        .unwrap()
    }

    #[test]
    fn matches_dijkstra_cost() {
        let graph = build_graph(&grid(), &GraphBuildOptions::default().with_max_distance(40.0));
        let expected = dijkstra(&graph, 0).distance(4);
        let found = a_star(&graph, 0, 4, &AStarOptions::default());
        assert!(found.is_found());
        assert!((found.cost - expected).abs() < 1e-9);
        assert_eq!(found.nodes.first(), Some(&0));
        assert_eq!(found.nodes.last(), Some(&4));
    }

    #[test]
    fn unreachable_goal_returns_empty_zero_cost() {
        let graph = build_graph(&grid(), &GraphBuildOptions::default().with_max_distance(1.0));
        let found = a_star(&graph, 0, 4, &AStarOptions::default());
        assert_eq!(found, SearchPath::not_found());
    }

    #[test]
    fn start_equals_goal() {
        let graph = build_graph(&grid(), &GraphBuildOptions::default());
        let found = a_star(&graph, 2, 2, &AStarOptions::default());
        assert_eq!(found.nodes, vec![2]);
        assert_eq!(found.cost, 0.0);
    }

    #[test]
    fn iteration_ceiling_yields_no_path() {
        let graph = build_graph(&grid(), &GraphBuildOptions::unbounded());
        let options = AStarOptions {
            max_iterations: Some(1),
        };
        assert!(!a_star(&graph, 0, 4, &options).is_found());
    }

    #[test]
    fn custom_weights_still_find_optimum() {
        let nodes = ["s", "x", "t"]
            .iter()
            .map(|id| (id.to_string(), None))
            .collect();
        let graph = Graph::from_parts(
            nodes,
            [("s", "t", 10.0), ("s", "x", 2.0), ("x", "t", 3.0)],
            EdgeWeighting::Custom,
        )
        .unwrap();
        let found = a_star(&graph, 0, 2, &AStarOptions::default());
        assert_eq!(found.nodes, vec![0, 1, 2]);
        assert_eq!(found.cost, 5.0);
    }
}
