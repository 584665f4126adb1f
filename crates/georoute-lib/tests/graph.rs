mod common;

use georoute_lib::{
    build_graph, haversine_km, load_entities, Coordinate, EdgeWeighting, Entity, EntitySet, Error,
    Graph, GraphBuildOptions, TravelMode,
};

use common::{equator_line, paris_fixture_path, with_outlier};

#[test]
fn threshold_links_only_close_pairs() {
    let entities = equator_line();
    let graph = build_graph(&entities, &GraphBuildOptions::default().with_max_distance(150.0));

    assert_eq!(graph.len(), 3);
    // A-B and B-C in both directions; A-C is ~222 km and excluded.
    assert_eq!(graph.edge_count(), 4);
    assert!(graph.edge_weight(0, 2).is_none());
    let ab = graph.edge_weight(0, 1).expect("A-B edge");
    assert!((ab - 111.195).abs() < 0.01);
    assert_eq!(graph.edge_weight(1, 0), Some(ab));
}

#[test]
fn unbounded_graph_is_complete() {
    let entities = equator_line();
    let graph = build_graph(&entities, &GraphBuildOptions::unbounded());
    assert_eq!(graph.edge_count(), 6);
}

#[test]
fn no_self_edges() {
    let entities = with_outlier();
    let graph = build_graph(&entities, &GraphBuildOptions::unbounded());
    for (from, edge) in graph.edges() {
        assert_ne!(from, edge.target);
    }
}

#[test]
fn default_threshold_isolates_distant_entity() {
    let entities = with_outlier();
    let graph = build_graph(&entities, &GraphBuildOptions::default());
    let far = graph.index_of("far").expect("far node");
    assert!(graph.neighbours(far).is_empty());
    assert!(!graph.neighbours(graph.index_of("hub").unwrap()).is_empty());
}

#[test]
fn travel_time_weights_divide_by_speed() {
    let entities = equator_line();
    for mode in [TravelMode::Car, TravelMode::Bus, TravelMode::Bike] {
        let options = GraphBuildOptions::unbounded().with_travel_mode(mode);
        let graph = build_graph(&entities, &options);
        assert_eq!(graph.weighting(), EdgeWeighting::TravelTime(mode));
        let expected = haversine_km(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0))
            / mode.speed_kmh();
        let weight = graph.edge_weight(0, 1).unwrap();
        assert!((weight - expected).abs() < 1e-12, "{mode}: {weight} vs {expected}");
    }
}

#[test]
fn threshold_applies_to_distance_not_time() {
    let entities = equator_line();
    let options = GraphBuildOptions::default()
        .with_max_distance(150.0)
        .with_travel_mode(TravelMode::Bike);
    let graph = build_graph(&entities, &options);
    assert_eq!(graph.edge_count(), 4);
}

#[test]
fn unknown_mode_name_falls_back_to_car() {
    assert_eq!(TravelMode::from_name("hovercraft"), TravelMode::Car);
    assert_eq!(TravelMode::from_name("BUS"), TravelMode::Bus);
    assert!("hovercraft".parse::<TravelMode>().is_err());
}

#[test]
fn entity_without_coordinate_is_isolated() {
    let mut lost = Entity::new("lost", 0.0, 0.0);
    lost.coordinate = None;
    let entities = EntitySet::new(vec![
        Entity::new("a", 0.0, 0.0),
        Entity::new("b", 0.0, 0.1),
        lost,
        Entity::new("bad", 120.0, 0.0),
    ])
    .unwrap();

    let graph = build_graph(&entities, &GraphBuildOptions::unbounded());
    assert_eq!(graph.len(), 4);
    assert!(graph.neighbours(2).is_empty());
    assert!(graph.neighbours(3).is_empty());
    assert_eq!(graph.edge_count(), 2);
}

#[test]
fn from_parts_rejects_dangling_edges() {
    let nodes = vec![("a".to_string(), None), ("b".to_string(), None)];
    let err = Graph::from_parts(nodes, [("a", "z", 1.0)], EdgeWeighting::Custom).unwrap_err();
    assert!(matches!(err, Error::DanglingEdge { ref to, .. } if to == "z"));
}

#[test]
fn from_parts_rejects_duplicate_nodes() {
    let nodes = vec![("a".to_string(), None), ("a".to_string(), None)];
    let err = Graph::from_parts(nodes, Vec::<(&str, &str, f64)>::new(), EdgeWeighting::Custom)
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateEntity { .. }));
}

#[test]
fn fixture_graph_has_expected_shape() {
    let entities = load_entities(&paris_fixture_path()).expect("fixture loads");
    let graph = build_graph(&entities, &GraphBuildOptions::default());

    assert_eq!(graph.len(), 8);
    let reims = graph.index_of("reims").unwrap();
    assert!(graph.neighbours(reims).is_empty());
    // The seven Paris-area hotels are all within 50 km of each other.
    assert_eq!(graph.edge_count(), 7 * 6);
}
