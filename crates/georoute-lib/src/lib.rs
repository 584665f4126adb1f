//! georoute library entry points.
//!
//! This crate turns a list of located entities into a geodesic routing graph
//! and answers routing queries over it: shortest path (Dijkstra, Bellman-Ford,
//! A*), fewest hops (BFS) and minimum spanning tree (Prim). Entities can also
//! be ranked by distance from an arbitrary location with [`rank_by_distance`]. Higher-level
//! consumers (the CLI, request handlers) should only depend on the functions
//! exported here instead of reimplementing behavior.
//!
//! Every query is self-contained: build an [`EntitySet`], describe the query
//! with a [`RouteRequest`] and call [`plan_route`].

#![deny(warnings)]

pub mod entity;
pub mod error;
pub mod geo;
pub mod graph;
pub mod mst;
pub mod nearest;
pub mod output;
pub mod path;
pub mod routing;

pub use entity::{load_entities, parse_entities, Entity, EntityId, EntitySet};
pub use error::{Error, Result};
pub use geo::{haversine_km, Coordinate, EARTH_RADIUS_KM};
pub use graph::{
    build_graph, Edge, EdgeWeighting, Graph, GraphBuildOptions, NodeIndex, TravelMode,
    DEFAULT_MAX_DISTANCE_KM,
};
pub use mst::{prim, SpanningTree, TreeEdge};
pub use nearest::{rank_by_distance, RankedEntity};
pub use output::{render_plan, RouteRenderMode, RouteStep, RouteSummary};
pub use path::{
    a_star, bellman_ford, dijkstra, find_route_bfs, reachable_from, reconstruct_path,
    AStarOptions, BellmanFordOutcome, SearchPath, ShortestPaths,
};
pub use routing::{
    plan_on_graph, plan_route, DistanceEntry, DistanceReport, NegativeCycleReport, PathResult,
    RouteAlgorithm, RouteEdge, RouteOutcome, RoutePlan, RouteRequest,
};
