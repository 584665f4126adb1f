//! Route planning over located entities.
//!
//! This module provides:
//! - [`RouteAlgorithm`] - Supported algorithms (BFS, Dijkstra, Bellman-Ford, A*, Prim)
//! - [`RouteRequest`] - High-level request: endpoints, algorithm, graph options
//! - [`RoutePlan`] / [`RouteOutcome`] - Tagged result returned to callers
//! - [`plan_route`] - Main entry point
//!
//! # Strategy Pattern
//!
//! Each algorithm is wrapped in a [`RoutePlanner`] implementation; adding an
//! algorithm means adding a planner and a [`RouteAlgorithm`] variant.
//!
//! # Example
//!
//! ```
//! use georoute_lib::{plan_route, Entity, EntitySet, RouteAlgorithm, RouteRequest};
//!
//! let entities = EntitySet::new(vec![
//!     Entity::new("a", 0.0, 0.0),
//!     Entity::new("b", 0.0, 0.4),
//!     Entity::new("c", 0.0, 0.8),
//! ])?;
//! let request = RouteRequest::new(RouteAlgorithm::Dijkstra, "a").to("c");
//! let plan = plan_route(&entities, &request)?;
//! assert_eq!(plan.path(), Some(&["a".to_string(), "b".to_string(), "c".to_string()][..]));
//! # Ok::<(), georoute_lib::Error>(())
//! ```

mod planner;

pub use planner::{
    select_planner, AStarPlanner, BellmanFordPlanner, BfsPlanner, DijkstraPlanner,
    PlannerOutcome, PrimPlanner, RoutePlanner,
};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entity::{EntityId, EntitySet};
use crate::error::{Error, Result};
use crate::graph::{build_graph, Graph, GraphBuildOptions, NodeIndex, TravelMode};
use crate::mst::SpanningTree;
use crate::path::{AStarOptions, SearchPath, ShortestPaths};

/// Supported routing algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RouteAlgorithm {
    /// Breadth-first search (fewest hops).
    Bfs,
    /// Dijkstra's algorithm (non-negative weights).
    #[default]
    Dijkstra,
    /// Bellman-Ford (signed weights, negative-cycle detection).
    BellmanFord,
    /// A* search (geodesic heuristic).
    AStar,
    /// Prim's minimum spanning tree.
    Prim,
}

impl RouteAlgorithm {
    pub const ALL: [RouteAlgorithm; 5] = [
        RouteAlgorithm::Bfs,
        RouteAlgorithm::Dijkstra,
        RouteAlgorithm::BellmanFord,
        RouteAlgorithm::AStar,
        RouteAlgorithm::Prim,
    ];

    /// Whether the algorithm produces a tree rather than a path.
    pub fn is_tree(self) -> bool {
        matches!(self, RouteAlgorithm::Prim)
    }
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::Bfs => "bfs",
            RouteAlgorithm::Dijkstra => "dijkstra",
            RouteAlgorithm::BellmanFord => "bellman-ford",
            RouteAlgorithm::AStar => "a-star",
            RouteAlgorithm::Prim => "prim",
        };
        f.write_str(value)
    }
}

impl FromStr for RouteAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "bfs" => Ok(RouteAlgorithm::Bfs),
            "dijkstra" => Ok(RouteAlgorithm::Dijkstra),
            "bellman-ford" | "bellmanford" => Ok(RouteAlgorithm::BellmanFord),
            "a-star" | "astar" | "a*" => Ok(RouteAlgorithm::AStar),
            "prim" | "mst" => Ok(RouteAlgorithm::Prim),
            other => Err(format!("unknown algorithm '{other}'")),
        }
    }
}

/// High-level route planning request.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub algorithm: RouteAlgorithm,
    /// Start entity. Optional only for [`RouteAlgorithm::Prim`], where it
    /// selects the tree root (first entity otherwise).
    pub source: Option<EntityId>,
    /// Goal entity. Dijkstra and Bellman-Ford return full distance maps
    /// without one; Prim ignores it.
    pub target: Option<EntityId>,
    pub graph: GraphBuildOptions,
    pub a_star: AStarOptions,
}

impl RouteRequest {
    /// Request starting at `source` with default graph options.
    pub fn new(algorithm: RouteAlgorithm, source: impl Into<EntityId>) -> Self {
        Self {
            algorithm,
            source: Some(source.into()),
            target: None,
            graph: GraphBuildOptions::default(),
            a_star: AStarOptions::default(),
        }
    }

    /// Convenience constructor for a BFS route.
    pub fn bfs(source: impl Into<EntityId>, target: impl Into<EntityId>) -> Self {
        Self::new(RouteAlgorithm::Bfs, source).to(target)
    }

    /// Spanning tree over every entity, linking all pairs.
    pub fn spanning_tree() -> Self {
        Self {
            algorithm: RouteAlgorithm::Prim,
            source: None,
            target: None,
            graph: GraphBuildOptions::unbounded(),
            a_star: AStarOptions::default(),
        }
    }

    pub fn to(mut self, target: impl Into<EntityId>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_graph_options(mut self, options: GraphBuildOptions) -> Self {
        self.graph = options;
        self
    }

    pub fn with_max_distance(mut self, km: Option<f64>) -> Self {
        self.graph.max_distance_km = km;
        self
    }

    pub fn with_travel_mode(mut self, mode: TravelMode) -> Self {
        self.graph.travel_mode = Some(mode);
        self
    }

    pub fn with_a_star(mut self, options: AStarOptions) -> Self {
        self.a_star = options;
        self
    }
}

/// Edge of a returned spanning tree, by entity identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteEdge {
    pub from: EntityId,
    pub to: EntityId,
    pub weight: f64,
}

/// Path-shaped result, tagged by whether it lists nodes or edges.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PathResult {
    /// Ordered entity ids from source to target; empty when unreachable, in
    /// which case `total_distance` is zero.
    #[serde(rename_all = "camelCase")]
    NodeSequence {
        path: Vec<EntityId>,
        total_distance: f64,
    },
    /// Spanning-tree edges. `complete` is false when the graph was
    /// disconnected and fewer than n-1 edges were found.
    #[serde(rename_all = "camelCase")]
    EdgeSequence {
        mst_edges: Vec<RouteEdge>,
        total_cost: f64,
        complete: bool,
    },
}

/// Distance from the source to one entity. `None` means unreachable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceEntry {
    pub id: EntityId,
    pub distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predecessor: Option<EntityId>,
}

/// Full single-source distance table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceReport {
    pub source: EntityId,
    pub distances: Vec<DistanceEntry>,
}

/// Marker returned when Bellman-Ford detects a negative cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NegativeCycleReport {
    pub negative_cycle_detected: bool,
    pub source: EntityId,
}

/// What a query produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RouteOutcome {
    Path(PathResult),
    Distances(DistanceReport),
    NegativeCycle(NegativeCycleReport),
}

/// Planned route returned by the library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub algorithm: RouteAlgorithm,
    /// Unit of every weight in the outcome: `km` or `h`.
    pub unit: &'static str,
    #[serde(flatten)]
    pub outcome: RouteOutcome,
}

impl RoutePlan {
    /// Node path when the outcome is a node sequence.
    pub fn path(&self) -> Option<&[EntityId]> {
        match &self.outcome {
            RouteOutcome::Path(PathResult::NodeSequence { path, .. }) => Some(path),
            _ => None,
        }
    }

    /// Total weight of a path or tree.
    pub fn total(&self) -> Option<f64> {
        match &self.outcome {
            RouteOutcome::Path(PathResult::NodeSequence { total_distance, .. }) => {
                Some(*total_distance)
            }
            RouteOutcome::Path(PathResult::EdgeSequence { total_cost, .. }) => Some(*total_cost),
            _ => None,
        }
    }

    /// Whether a path query found nothing.
    pub fn is_unreachable(&self) -> bool {
        matches!(self.path(), Some(path) if path.is_empty())
    }

    pub fn has_negative_cycle(&self) -> bool {
        matches!(self.outcome, RouteOutcome::NegativeCycle(_))
    }

    /// Number of hops in a node path.
    pub fn hop_count(&self) -> usize {
        self.path().map(|p| p.len().saturating_sub(1)).unwrap_or(0)
    }
}

/// Compute a route, distance table or spanning tree for `request`.
///
/// Unknown identifiers and missing endpoints are errors; unreachable targets,
/// disconnected graphs and negative cycles are reported in the returned plan.
pub fn plan_route(entities: &EntitySet, request: &RouteRequest) -> Result<RoutePlan> {
    if entities.is_empty() {
        return Err(Error::EmptyEntitySet);
    }
    let (source, target) = resolve_endpoints(request, |id| entities.resolve(id))?;
    let graph = build_graph(entities, &request.graph);
    Ok(execute(&graph, request, source, target))
}

/// Run `request` against a prebuilt graph, for example one assembled with
/// [`Graph::from_parts`] carrying signed weights. `request.graph` is ignored.
pub fn plan_on_graph(graph: &Graph, request: &RouteRequest) -> Result<RoutePlan> {
    if graph.is_empty() {
        return Err(Error::EmptyEntitySet);
    }
    let (source, target) = resolve_endpoints(request, |id| {
        graph.index_of(id).ok_or_else(|| Error::UnknownEntity {
            id: id.to_string(),
            suggestions: Vec::new(),
        })
    })?;
    Ok(execute(graph, request, source, target))
}

fn resolve_endpoints<F>(
    request: &RouteRequest,
    resolve: F,
) -> Result<(NodeIndex, Option<NodeIndex>)>
where
    F: Fn(&str) -> Result<NodeIndex>,
{
    let source = match request.source.as_deref() {
        Some(id) => resolve(id)?,
        None if request.algorithm.is_tree() => 0,
        None => {
            return Err(Error::MissingEndpoint {
                role: "source",
                algorithm: request.algorithm,
            })
        }
    };

    // Spanning trees ignore the target, so a stale one is not an error.
    if request.algorithm.is_tree() {
        return Ok((source, None));
    }

    let target = match request.target.as_deref() {
        Some(id) => Some(resolve(id)?),
        None if select_planner(request).requires_target() => {
            return Err(Error::MissingEndpoint {
                role: "target",
                algorithm: request.algorithm,
            })
        }
        None => None,
    };

    Ok((source, target))
}

fn execute(
    graph: &Graph,
    request: &RouteRequest,
    source: NodeIndex,
    target: Option<NodeIndex>,
) -> RoutePlan {
    let planner = select_planner(request);
    let outcome = planner.plan(graph, source, target);

    debug!(
        algorithm = %request.algorithm,
        source,
        target = ?target,
        "planner finished"
    );

    RoutePlan {
        algorithm: request.algorithm,
        unit: graph.weighting().unit(),
        outcome: to_route_outcome(graph, source, outcome),
    }
}

fn to_route_outcome(graph: &Graph, source: NodeIndex, outcome: PlannerOutcome) -> RouteOutcome {
    match outcome {
        PlannerOutcome::Path(path) => RouteOutcome::Path(node_sequence(graph, path)),
        PlannerOutcome::Distances(paths) => RouteOutcome::Distances(distance_report(graph, &paths)),
        PlannerOutcome::Tree(tree) => RouteOutcome::Path(edge_sequence(graph, &tree)),
        PlannerOutcome::NegativeCycle => RouteOutcome::NegativeCycle(NegativeCycleReport {
            negative_cycle_detected: true,
            source: id_of(graph, source),
        }),
    }
}

fn node_sequence(graph: &Graph, path: SearchPath) -> PathResult {
    if !path.is_found() {
        return PathResult::NodeSequence {
            path: Vec::new(),
            total_distance: 0.0,
        };
    }
    PathResult::NodeSequence {
        path: path.nodes.iter().map(|&node| id_of(graph, node)).collect(),
        total_distance: path.cost,
    }
}

fn edge_sequence(graph: &Graph, tree: &SpanningTree) -> PathResult {
    PathResult::EdgeSequence {
        mst_edges: tree
            .edges
            .iter()
            .map(|edge| RouteEdge {
                from: id_of(graph, edge.from),
                to: id_of(graph, edge.to),
                weight: edge.weight,
            })
            .collect(),
        total_cost: tree.total_weight,
        complete: tree.is_complete(),
    }
}

fn distance_report(graph: &Graph, paths: &ShortestPaths) -> DistanceReport {
    let distances = (0..graph.len())
        .map(|node| DistanceEntry {
            id: id_of(graph, node),
            distance: Some(paths.distance(node)).filter(|d| d.is_finite()),
            predecessor: paths
                .predecessors
                .get(node)
                .copied()
                .flatten()
                .map(|p| id_of(graph, p)),
        })
        .collect();
    DistanceReport {
        source: id_of(graph, paths.source),
        distances,
    }
}

fn id_of(graph: &Graph, node: NodeIndex) -> EntityId {
    graph.node_id(node).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algorithm_names_round_trip_through_display() {
        for algorithm in RouteAlgorithm::ALL {
            assert_eq!(algorithm.to_string().parse::<RouteAlgorithm>(), Ok(algorithm));
        }
        assert_eq!("A*".parse::<RouteAlgorithm>(), Ok(RouteAlgorithm::AStar));
        assert_eq!("bellman_ford".parse::<RouteAlgorithm>(), Ok(RouteAlgorithm::BellmanFord));
        assert!("floyd".parse::<RouteAlgorithm>().is_err());
    }

    #[test]
    fn spanning_tree_request_links_every_pair() {
        let request = RouteRequest::spanning_tree();
        assert_eq!(request.algorithm, RouteAlgorithm::Prim);
        assert_eq!(request.graph.max_distance_km, None);
        assert!(request.source.is_none());
    }

    #[test]
    fn route_plan_hop_count() {
        let plan = RoutePlan {
            algorithm: RouteAlgorithm::Bfs,
            unit: "km",
            outcome: RouteOutcome::Path(PathResult::NodeSequence {
                path: vec!["a".into(), "b".into(), "c".into()],
                total_distance: 2.0,
            }),
        };
        assert_eq!(plan.hop_count(), 2);
        assert!(!plan.is_unreachable());
    }

    #[test]
    fn negative_cycle_serialises_flag() {
        let plan = RoutePlan {
            algorithm: RouteAlgorithm::BellmanFord,
            unit: "",
            outcome: RouteOutcome::NegativeCycle(NegativeCycleReport {
                negative_cycle_detected: true,
                source: "s".into(),
            }),
        };
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["negativeCycleDetected"], serde_json::json!(true));
        assert_eq!(json["algorithm"], serde_json::json!("bellman-ford"));
    }

    #[test]
    fn node_sequence_serialises_external_shape() {
        let result = PathResult::NodeSequence {
            path: vec!["a".into()],
            total_distance: 0.0,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["kind"], serde_json::json!("nodeSequence"));
        assert_eq!(json["path"], serde_json::json!(["a"]));
        assert_eq!(json["totalDistance"], serde_json::json!(0.0));
    }
}
