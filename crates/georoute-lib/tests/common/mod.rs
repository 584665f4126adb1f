//! Common test utilities and fixture helpers.
//!
//! This module provides shared entity sets and seeded random entity clouds
//! for the brute-force property checks.

#![allow(dead_code)]

use std::path::PathBuf;

use georoute_lib::{EdgeWeighting, Entity, EntitySet, Graph};
use rand::rngs::StdRng;
use rand::Rng;

/// Path to fixtures directory used by tests.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Path to the Paris hotels fixture (eight entities, one far outside Paris).
pub fn paris_fixture_path() -> PathBuf {
    fixtures_dir().join("paris_hotels.json")
}

/// Three colinear entities on the equator, one degree of longitude apart.
pub fn equator_line() -> EntitySet {
    EntitySet::new(vec![
        Entity::new("A", 0.0, 0.0),
        Entity::new("B", 0.0, 1.0),
        Entity::new("C", 0.0, 2.0),
    ])
    .expect("unique ids")
}

/// Entity set where `far` is well outside the default 50 km threshold.
pub fn with_outlier() -> EntitySet {
    EntitySet::new(vec![
        Entity::new("hub", 48.8566, 2.3522),
        Entity::new("east", 48.8566, 2.5),
        Entity::new("north", 49.0, 2.3522),
        Entity::new("far", 45.764, 4.8357),
    ])
    .expect("unique ids")
}

/// Node list with ids `n0..n{count}` and no coordinates.
pub fn bare_nodes(count: usize) -> Vec<(String, Option<georoute_lib::Coordinate>)> {
    (0..count).map(|i| (format!("n{i}"), None)).collect()
}

/// Graph over `n0..n{count}` with the given directed edges.
pub fn custom_graph(count: usize, edges: &[(usize, usize, f64)]) -> Graph {
    let named: Vec<(String, String, f64)> = edges
        .iter()
        .map(|&(a, b, w)| (format!("n{a}"), format!("n{b}"), w))
        .collect();
    Graph::from_parts(bare_nodes(count), named, EdgeWeighting::Custom).expect("valid graph")
}

/// Random entities scattered in a small box around `(lat, lng)`.
pub fn random_entities(rng: &mut StdRng, count: usize, spread_deg: f64) -> EntitySet {
    let entities = (0..count)
        .map(|i| {
            Entity::new(
                format!("e{i}"),
                48.0 + rng.random_range(-spread_deg..spread_deg),
                2.0 + rng.random_range(-spread_deg..spread_deg),
            )
        })
        .collect();
    EntitySet::new(entities).expect("unique ids")
}
