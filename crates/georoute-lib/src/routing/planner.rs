//! Route planning strategies implementing the Strategy pattern.
//!
//! This module provides the `RoutePlanner` trait and one implementation per
//! algorithm. `plan_route` only resolves endpoints, builds the graph and hands
//! it to whichever planner [`select_planner`] returns.

use crate::graph::{Graph, NodeIndex};
use crate::mst::{prim, SpanningTree};
use crate::path::{a_star, bellman_ford, dijkstra, find_route_bfs, AStarOptions};
use crate::path::{BellmanFordOutcome, SearchPath, ShortestPaths};

use super::{RouteAlgorithm, RouteRequest};

/// Raw planner output expressed in node indices.
#[derive(Debug, Clone, PartialEq)]
pub enum PlannerOutcome {
    /// Source-to-target path; empty when unreachable.
    Path(SearchPath),
    /// Distances from the source to every node (target omitted).
    Distances(ShortestPaths),
    /// Spanning tree, possibly partial.
    Tree(SpanningTree),
    /// Bellman-Ford found a reachable negative-weight cycle.
    NegativeCycle,
}

/// Trait for route planning strategies.
pub trait RoutePlanner: Send + Sync {
    /// The algorithm identifier for this planner.
    fn algorithm(&self) -> RouteAlgorithm;

    /// Whether a target entity is mandatory.
    fn requires_target(&self) -> bool {
        true
    }

    /// Execute the algorithm. `source` is always a valid node index.
    fn plan(&self, graph: &Graph, source: NodeIndex, target: Option<NodeIndex>) -> PlannerOutcome;
}

/// Breadth-first search planner: fewest hops, weights ignored for the search
/// but summed for the reported total.
#[derive(Debug, Clone, Default)]
pub struct BfsPlanner;

impl RoutePlanner for BfsPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Bfs
    }

    fn plan(&self, graph: &Graph, source: NodeIndex, target: Option<NodeIndex>) -> PlannerOutcome {
        let Some(target) = target else {
            return PlannerOutcome::Path(SearchPath::not_found());
        };
        let path = find_route_bfs(graph, source, target)
            .and_then(|nodes| {
                graph
                    .path_weight(&nodes)
                    .map(|cost| SearchPath { nodes, cost })
            })
            .unwrap_or_else(SearchPath::not_found);
        PlannerOutcome::Path(path)
    }
}

/// Dijkstra planner. Without a target it reports the full distance map.
#[derive(Debug, Clone, Default)]
pub struct DijkstraPlanner;

impl RoutePlanner for DijkstraPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Dijkstra
    }

    fn requires_target(&self) -> bool {
        false
    }

    fn plan(&self, graph: &Graph, source: NodeIndex, target: Option<NodeIndex>) -> PlannerOutcome {
        shortest_paths_outcome(dijkstra(graph, source), target)
    }
}

/// Bellman-Ford planner for graphs that may carry negative weights.
#[derive(Debug, Clone, Default)]
pub struct BellmanFordPlanner;

impl RoutePlanner for BellmanFordPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::BellmanFord
    }

    fn requires_target(&self) -> bool {
        false
    }

    fn plan(&self, graph: &Graph, source: NodeIndex, target: Option<NodeIndex>) -> PlannerOutcome {
        match bellman_ford(graph, source) {
            BellmanFordOutcome::Distances(paths) => shortest_paths_outcome(paths, target),
            BellmanFordOutcome::NegativeCycle => PlannerOutcome::NegativeCycle,
        }
    }
}

/// A* planner guided by the geodesic heuristic.
#[derive(Debug, Clone, Default)]
pub struct AStarPlanner {
    options: AStarOptions,
}

impl AStarPlanner {
    pub fn new(options: AStarOptions) -> Self {
        Self { options }
    }
}

impl RoutePlanner for AStarPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::AStar
    }

    fn plan(&self, graph: &Graph, source: NodeIndex, target: Option<NodeIndex>) -> PlannerOutcome {
        let path = match target {
            Some(target) => a_star(graph, source, target, &self.options),
            None => SearchPath::not_found(),
        };
        PlannerOutcome::Path(path)
    }
}

/// Prim planner. The source, when given, is the tree root.
#[derive(Debug, Clone, Default)]
pub struct PrimPlanner;

impl RoutePlanner for PrimPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Prim
    }

    fn requires_target(&self) -> bool {
        false
    }

    fn plan(&self, graph: &Graph, source: NodeIndex, _target: Option<NodeIndex>) -> PlannerOutcome {
        PlannerOutcome::Tree(prim(graph, source))
    }
}

/// Select the appropriate planner for a given request.
pub fn select_planner(request: &RouteRequest) -> Box<dyn RoutePlanner> {
    match request.algorithm {
        RouteAlgorithm::Bfs => Box::new(BfsPlanner),
        RouteAlgorithm::Dijkstra => Box::new(DijkstraPlanner),
        RouteAlgorithm::BellmanFord => Box::new(BellmanFordPlanner),
        RouteAlgorithm::AStar => Box::new(AStarPlanner::new(request.a_star)),
        RouteAlgorithm::Prim => Box::new(PrimPlanner),
    }
}

fn shortest_paths_outcome(paths: ShortestPaths, target: Option<NodeIndex>) -> PlannerOutcome {
    match target {
        Some(target) => {
            let nodes = paths.path_to(target);
            if nodes.is_empty() {
                PlannerOutcome::Path(SearchPath::not_found())
            } else {
                PlannerOutcome::Path(SearchPath {
                    nodes,
                    cost: paths.distance(target),
                })
            }
        }
        None => PlannerOutcome::Distances(paths),
    }
}
