mod common;

use common::{build, pt, PlanarPoint};
use roadgraph_lib::{Error, Graph, RoadClass};

#[test]
fn durations_follow_the_road_class() {
    let (a, b) = (pt(0.0, 0.0), pt(1.0, 0.0));
    let graph = build(
        &[a, b],
        &[(a, b, "motorway", 1.0), (b, a, "cart_path", 1.0)],
    );

    let durations: Vec<f64> = graph.edges().map(|edge| edge.duration()).collect();
    assert_eq!(durations, vec![1.0 / 70.0, 1.0 / 20.0]);

    let classes: Vec<&RoadClass> = graph.edges().map(|edge| edge.road_class()).collect();
    assert_eq!(
        classes,
        vec![&RoadClass::Motorway, &RoadClass::Other("cart_path".into())]
    );
}

#[test]
fn failed_edge_insertions_leave_the_graph_untouched() {
    let (a, b) = (pt(0.0, 0.0), pt(1.0, 0.0));
    let mut graph: Graph<PlanarPoint> = build(&[a], &[]);

    let err = graph.add_edge(&a, &b, "Nowhere Rd", "primary", 1.0).unwrap_err();
    assert!(matches!(err, Error::UnknownVertex { .. }));
    assert_eq!(graph.num_edges(), 0);

    graph.add_vertex(b);
    for length in [-1.0, f64::NAN, f64::INFINITY] {
        let err = graph.add_edge(&a, &b, "", "primary", length).unwrap_err();
        assert!(matches!(err, Error::InvalidLength { .. }));
    }
    assert_eq!(graph.num_edges(), 0);
    assert_eq!(graph.node(graph.node_id(&a).unwrap()).unwrap().degree(), 0);
}

#[test]
fn duplicate_vertices_are_reported_not_added() {
    let mut graph = Graph::new();
    assert!(graph.add_vertex(pt(2.0, 3.0)));
    assert!(!graph.add_vertex(pt(2.0, 3.0)));
    assert_eq!(graph.num_vertices(), 1);
    assert_eq!(graph.vertices().collect::<Vec<_>>(), vec![&pt(2.0, 3.0)]);
}

#[test]
fn other_end_round_trips_and_rejects_strangers() {
    let (a, b, c) = (pt(0.0, 0.0), pt(1.0, 0.0), pt(2.0, 0.0));
    let graph = build(&[a, b, c], &[(a, b, "service", 1.0)]);
    let (ia, ib, ic) = (
        graph.node_id(&a).unwrap(),
        graph.node_id(&b).unwrap(),
        graph.node_id(&c).unwrap(),
    );

    let edge = graph.edges().next().unwrap();
    assert_eq!(edge.other_end(ia).unwrap(), ib);
    assert_eq!(edge.other_end(edge.other_end(ia).unwrap()).unwrap(), ia);
    assert!(matches!(
        edge.other_end(ic),
        Err(Error::NotAnEndpoint { .. })
    ));
}

#[test]
fn neighbours_are_distinct_and_outgoing_only() {
    let (a, b, c) = (pt(0.0, 0.0), pt(1.0, 0.0), pt(2.0, 0.0));
    let graph = build(
        &[a, b, c],
        &[
            (a, b, "primary", 1.0),
            (a, b, "track", 1.0),
            (c, a, "primary", 2.0),
        ],
    );
    let ia = graph.node_id(&a).unwrap();

    let neighbours: Vec<_> = graph
        .neighbors(ia)
        .into_iter()
        .map(|id| *graph.location(id))
        .collect();
    assert_eq!(neighbours, vec![b]);
    assert_eq!(graph.outgoing(ia).count(), 2);
}
