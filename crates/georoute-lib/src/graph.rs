use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::entity::{EntityId, EntitySet};
use crate::error::{Error, Result};
use crate::geo::{haversine_km, Coordinate};

/// Default edge threshold. Pairs further apart than this are not linked,
/// which keeps city-scale graphs sparse.
pub const DEFAULT_MAX_DISTANCE_KM: f64 = 50.0;

/// Dense index of a node inside a [`Graph`]. For graphs built from an
/// [`EntitySet`] it equals the entity's position in the set.
pub type NodeIndex = usize;

/// Travel modes and the fixed speed each one assumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Car,
    Bus,
    Bike,
}

impl TravelMode {
    /// Average speed in km/h.
    pub fn speed_kmh(self) -> f64 {
        match self {
            TravelMode::Car => 60.0,
            TravelMode::Bus => 40.0,
            TravelMode::Bike => 20.0,
        }
    }

    /// Parse a mode name, falling back to [`TravelMode::Car`] for anything
    /// unrecognised.
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            warn!(mode = name, "unknown travel mode; falling back to car");
            TravelMode::Car
        })
    }
}

impl FromStr for TravelMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "car" => Ok(TravelMode::Car),
            "bus" => Ok(TravelMode::Bus),
            "bike" => Ok(TravelMode::Bike),
            other => Err(format!("unknown travel mode '{other}'")),
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            TravelMode::Car => "car",
            TravelMode::Bus => "bus",
            TravelMode::Bike => "bike",
        };
        f.write_str(value)
    }
}

/// How edge weights relate to geodesic distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeWeighting {
    /// Weight is the distance in kilometres.
    Distance,
    /// Weight is the travel time in hours at the mode's speed.
    TravelTime(TravelMode),
    /// Weights were supplied directly and bear no relation to coordinates.
    Custom,
}

impl EdgeWeighting {
    /// Factor converting kilometres into this weighting's unit, or `None`
    /// when weights are unrelated to distance.
    pub fn km_factor(self) -> Option<f64> {
        match self {
            EdgeWeighting::Distance => Some(1.0),
            EdgeWeighting::TravelTime(mode) => Some(1.0 / mode.speed_kmh()),
            EdgeWeighting::Custom => None,
        }
    }

    /// Short unit label for rendering.
    pub fn unit(self) -> &'static str {
        match self {
            EdgeWeighting::Distance => "km",
            EdgeWeighting::TravelTime(_) => "h",
            EdgeWeighting::Custom => "",
        }
    }
}

/// Options controlling graph construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphBuildOptions {
    /// Longest edge kept, in kilometres. `None` or `+inf` links every pair,
    /// while a NaN limit links none.
    pub max_distance_km: Option<f64>,
    /// Weight edges by travel time under this mode instead of distance.
    pub travel_mode: Option<TravelMode>,
}

impl Default for GraphBuildOptions {
    fn default() -> Self {
        Self {
            max_distance_km: Some(DEFAULT_MAX_DISTANCE_KM),
            travel_mode: None,
        }
    }
}

impl GraphBuildOptions {
    /// Options linking every pair of entities.
    pub fn unbounded() -> Self {
        Self {
            max_distance_km: None,
            travel_mode: None,
        }
    }

    pub fn with_max_distance(mut self, km: f64) -> Self {
        self.max_distance_km = Some(km);
        self
    }

    pub fn with_travel_mode(mut self, mode: TravelMode) -> Self {
        self.travel_mode = Some(mode);
        self
    }

    fn weighting(&self) -> EdgeWeighting {
        match self.travel_mode {
            Some(mode) => EdgeWeighting::TravelTime(mode),
            None => EdgeWeighting::Distance,
        }
    }

    fn admits(&self, distance_km: f64) -> bool {
        match self.max_distance_km {
            None => true,
            // NaN compares false against everything, so no pair is linked.
            Some(limit) => distance_km <= limit,
        }
    }
}

/// Outgoing edge within the routing graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub target: NodeIndex,
    pub weight: f64,
}

/// Graph structure used by the solvers.
///
/// Immutable once built; cloning is cheap because the adjacency is shared.
#[derive(Debug, Clone)]
pub struct Graph {
    weighting: EdgeWeighting,
    ids: Arc<[EntityId]>,
    index: Arc<HashMap<EntityId, NodeIndex>>,
    coordinates: Arc<[Option<Coordinate>]>,
    adjacency: Arc<[Vec<Edge>]>,
}

impl Graph {
    /// Assemble a graph from explicit nodes and directed, weighted edges.
    ///
    /// Weights may be negative. Every edge endpoint must name a node.
    pub fn from_parts<I, S>(
        nodes: Vec<(EntityId, Option<Coordinate>)>,
        edges: I,
        weighting: EdgeWeighting,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (S, S, f64)>,
        S: AsRef<str>,
    {
        let mut index = HashMap::with_capacity(nodes.len());
        for (position, (id, _)) in nodes.iter().enumerate() {
            if index.insert(id.clone(), position).is_some() {
                return Err(Error::DuplicateEntity { id: id.clone() });
            }
        }

        let mut adjacency = vec![Vec::new(); nodes.len()];
        for (from, to, weight) in edges {
            let (from, to) = (from.as_ref(), to.as_ref());
            let (Some(&source), Some(&target)) = (index.get(from), index.get(to)) else {
                return Err(Error::DanglingEdge {
                    from: from.to_string(),
                    to: to.to_string(),
                });
            };
            adjacency[source].push(Edge { target, weight });
        }

        let (ids, coordinates): (Vec<_>, Vec<_>) = nodes
            .into_iter()
            .map(|(id, coordinate)| (id, coordinate.filter(Coordinate::is_valid)))
            .unzip();
        Ok(Self {
            weighting,
            ids: ids.into(),
            index: Arc::new(index),
            coordinates: coordinates.into(),
            adjacency: adjacency.into(),
        })
    }

    pub fn weighting(&self) -> EdgeWeighting {
        self.weighting
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Total number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    pub fn node_id(&self, node: NodeIndex) -> Option<&EntityId> {
        self.ids.get(node)
    }

    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    /// Valid coordinate for a node, if it has one.
    pub fn coordinate(&self, node: NodeIndex) -> Option<Coordinate> {
        self.coordinates.get(node).copied().flatten()
    }

    /// Outgoing edges of a node; empty for unknown indices.
    pub fn neighbours(&self, node: NodeIndex) -> &[Edge] {
        self.adjacency
            .get(node)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Iterate all directed edges as `(from, edge)` pairs.
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, &Edge)> {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(from, edges)| edges.iter().map(move |edge| (from, edge)))
    }

    /// Lightest direct edge weight from `from` to `to`.
    pub fn edge_weight(&self, from: NodeIndex, to: NodeIndex) -> Option<f64> {
        self.neighbours(from)
            .iter()
            .filter(|edge| edge.target == to)
            .map(|edge| edge.weight)
            .min_by(f64::total_cmp)
    }

    /// Summed weight along consecutive nodes, or `None` if a hop has no edge.
    pub fn path_weight(&self, path: &[NodeIndex]) -> Option<f64> {
        path.windows(2)
            .map(|pair| self.edge_weight(pair[0], pair[1]))
            .sum()
    }

    /// Straight-line lower bound on the cost between two nodes, in the
    /// graph's weight unit. Zero when it cannot be derived.
    pub fn heuristic(&self, from: NodeIndex, to: NodeIndex) -> f64 {
        let Some(factor) = self.weighting.km_factor() else {
            return 0.0;
        };
        match (self.coordinate(from), self.coordinate(to)) {
            (Some(a), Some(b)) => haversine_km(a, b) * factor,
            _ => 0.0,
        }
    }
}

/// Build a routing graph from located entities.
///
/// Every pair within the threshold is linked in both directions. Entities
/// without a valid coordinate stay in the graph as isolated nodes.
pub fn build_graph(entities: &EntitySet, options: &GraphBuildOptions) -> Graph {
    let weighting = options.weighting();
    let factor = weighting.km_factor().unwrap_or(1.0);
    if options.max_distance_km.is_some_and(f64::is_nan) {
        warn!("max distance is NaN; no edges will be linked");
    }

    let coordinates: Vec<Option<Coordinate>> = entities
        .iter()
        .map(|entity| {
            let coordinate = entity.valid_coordinate();
            if coordinate.is_none() {
                warn!(entity = %entity.id, "entity has no valid coordinate; it will be isolated");
            }
            coordinate
        })
        .collect();

    let mut adjacency: Vec<Vec<Edge>> = vec![Vec::new(); coordinates.len()];
    for (i, a) in coordinates.iter().enumerate() {
        let Some(a) = a else { continue };
        for (j, b) in coordinates.iter().enumerate().skip(i + 1) {
            let Some(b) = b else { continue };
            let distance = haversine_km(*a, *b);
            if !options.admits(distance) {
                continue;
            }
            let weight = distance * factor;
            adjacency[i].push(Edge { target: j, weight });
            adjacency[j].push(Edge { target: i, weight });
        }
    }

    let ids: Vec<EntityId> = entities.iter().map(|entity| entity.id.clone()).collect();
    let index = ids
        .iter()
        .enumerate()
        .map(|(position, id)| (id.clone(), position))
        .collect();

    let graph = Graph {
        weighting,
        ids: ids.into(),
        index: Arc::new(index),
        coordinates: coordinates.into(),
        adjacency: adjacency.into(),
    };

    debug!(
        nodes = graph.len(),
        edges = graph.edge_count(),
        max_distance_km = ?options.max_distance_km,
        travel_mode = ?options.travel_mode,
        "built routing graph"
    );

    graph
}
