//! Common test utilities and fixture graphs.
//!
//! Fixtures use planar coordinates with Euclidean distance so expected costs
//! can be worked out by hand.

use std::fmt;
use std::hash::{Hash, Hasher};

use roadgraph_lib::{Graph, Location};

/// Point on a flat plane.
#[derive(Debug, Clone, Copy)]
pub struct PlanarPoint {
    pub x: f64,
    pub y: f64,
}

#[allow(dead_code)]
pub fn pt(x: f64, y: f64) -> PlanarPoint {
    PlanarPoint { x, y }
}

impl PartialEq for PlanarPoint {
    fn eq(&self, other: &Self) -> bool {
        self.x.to_bits() == other.x.to_bits() && self.y.to_bits() == other.y.to_bits()
    }
}

impl Eq for PlanarPoint {}

impl Hash for PlanarPoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.to_bits().hash(state);
        self.y.to_bits().hash(state);
    }
}

impl fmt::Display for PlanarPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

impl Location for PlanarPoint {
    fn distance(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Build a graph from vertices and `(from, to, class, length)` segments.
#[allow(dead_code)]
pub fn build(
    vertices: &[PlanarPoint],
    segments: &[(PlanarPoint, PlanarPoint, &str, f64)],
) -> Graph<PlanarPoint> {
    let mut graph = Graph::new();
    for vertex in vertices {
        graph.add_vertex(*vertex);
    }
    for (from, to, class, length) in segments {
        graph
            .add_edge(from, to, format!("{from}->{to}"), *class, *length)
            .expect("fixture segment is valid");
    }
    graph
}

#[allow(dead_code)]
fn both_ways<'a>(
    chain: &[PlanarPoint],
    class: &'a str,
    length: f64,
) -> Vec<(PlanarPoint, PlanarPoint, &'a str, f64)> {
    chain
        .windows(2)
        .flat_map(|pair| {
            [
                (pair[0], pair[1], class, length),
                (pair[1], pair[0], class, length),
            ]
        })
        .collect()
}

/// Scenario where A* should visit far fewer nodes than Dijkstra.
///
/// A four-leg motorway runs from (1, 1) to (8, -1), each leg 2 long. A dead-end
/// decoy of four 1-long legs heads the opposite way from the start. Dijkstra
/// finalises the whole decoy before reaching the goal (9 visits); A* never
/// touches it (5 visits). Both arrive after 8/70 time units.
#[allow(dead_code)]
pub fn decoy_graph() -> (Graph<PlanarPoint>, PlanarPoint, PlanarPoint) {
    let start = pt(1.0, 1.0);
    let goal = pt(8.0, -1.0);
    let main = [start, pt(2.75, 0.5), pt(4.5, 0.0), pt(6.25, -0.5), goal];
    let decoy = [start, pt(0.0, 1.0), pt(-1.0, 1.0), pt(-2.0, 1.0), pt(-3.0, 1.0)];

    let vertices: Vec<_> = main.iter().chain(&decoy[1..]).copied().collect();
    let mut segments = both_ways(&main, "motorway", 2.0);
    segments.extend(both_ways(&decoy, "motorway", 1.0));

    (build(&vertices, &segments), start, goal)
}

/// Square where S->T has a slow edge added after a fast one.
///
/// Via T on the fast edge costs 2/70; via U costs 2/50; via T on the slow
/// edge costs 1/25 + 1/70.
#[allow(dead_code)]
pub fn parallel_edge_graph() -> (Graph<PlanarPoint>, [PlanarPoint; 4]) {
    let (s, t, u, g) = (pt(0.0, 0.0), pt(1.0, 0.0), pt(0.0, 1.0), pt(1.0, 1.0));
    let graph = build(
        &[s, t, u, g],
        &[
            (s, t, "motorway", 1.0),
            (s, u, "secondary", 1.0),
            (u, g, "secondary", 1.0),
            (t, g, "motorway", 1.0),
            (s, t, "residential", 1.0),
        ],
    );
    (graph, [s, t, u, g])
}

/// Straight line where the one-hop road is much slower than three motorway legs.
#[allow(dead_code)]
pub fn shortcut_graph() -> (Graph<PlanarPoint>, [PlanarPoint; 4]) {
    let (s, a, b, g) = (pt(0.0, 0.0), pt(1.0, 0.0), pt(2.0, 0.0), pt(3.0, 0.0));
    let graph = build(
        &[s, a, b, g],
        &[
            (s, g, "track", 3.0),
            (s, a, "motorway", 1.0),
            (a, b, "motorway", 1.0),
            (b, g, "motorway", 1.0),
        ],
    );
    (graph, [s, a, b, g])
}

/// Small triangle plus a vertex that can leave but never be reached.
#[allow(dead_code)]
pub fn disconnected_graph() -> (Graph<PlanarPoint>, PlanarPoint, PlanarPoint) {
    let (a, b, c, island) = (pt(0.0, 0.0), pt(1.0, 0.0), pt(0.0, 1.0), pt(10.0, 10.0));
    let mut segments = both_ways(&[a, b, c, a], "residential", 1.5);
    segments.push((island, a, "residential", 15.0));
    (build(&[a, b, c, island], &segments), a, island)
}
