use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::location::Location;
use crate::road::RoadClass;

/// Index of a node within its [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Index of an edge within its [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct EdgeId(usize);

impl EdgeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Directed road segment between two nodes.
///
/// Edges are immutable once built: the traversal duration is derived from
/// the length and road class at construction and never recomputed.
#[derive(Debug, Clone)]
pub struct Edge {
    start: NodeId,
    end: NodeId,
    road_name: String,
    road_class: RoadClass,
    length: f64,
    duration: f64,
}

impl Edge {
    fn new(
        start: NodeId,
        end: NodeId,
        road_name: String,
        road_class: RoadClass,
        length: f64,
    ) -> Self {
        let duration = road_class.travel_time(length);
        Self {
            start,
            end,
            road_name,
            road_class,
            length,
            duration,
        }
    }

    pub fn start(&self) -> NodeId {
        self.start
    }

    pub fn end(&self) -> NodeId {
        self.end
    }

    pub fn road_name(&self) -> &str {
        &self.road_name
    }

    pub fn road_class(&self) -> &RoadClass {
        &self.road_class
    }

    /// Segment length in kilometres.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Time to traverse the segment (`length / speed`).
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Given one endpoint, return the other.
    ///
    /// Fails with [`Error::NotAnEndpoint`] when `node` is neither endpoint.
    pub fn other_end(&self, node: NodeId) -> Result<NodeId> {
        if node == self.start {
            Ok(self.end)
        } else if node == self.end {
            Ok(self.start)
        } else {
            Err(Error::NotAnEndpoint {
                node,
                start: self.start,
                end: self.end,
            })
        }
    }
}

/// Graph vertex: one intersection and its outgoing road segments.
///
/// Two nodes are equal when their locations are equal, regardless of edges.
#[derive(Debug, Clone)]
pub struct Node<C> {
    location: C,
    outgoing: Vec<EdgeId>,
}

impl<C> Node<C> {
    pub fn location(&self) -> &C {
        &self.location
    }

    /// Identifiers of the edges leaving this node, in insertion order.
    pub fn outgoing(&self) -> &[EdgeId] {
        &self.outgoing
    }

    pub fn degree(&self) -> usize {
        self.outgoing.len()
    }
}

impl<C: PartialEq> PartialEq for Node<C> {
    fn eq(&self, other: &Self) -> bool {
        self.location == other.location
    }
}

impl<C: Eq> Eq for Node<C> {}

impl<C: Hash> Hash for Node<C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.location.hash(state);
    }
}

/// Directed road network keyed by location.
///
/// Nodes and edges live in arenas; a node's adjacency stores edge ids so the
/// graph's edge collection and every adjacency list refer to the same edge.
#[derive(Debug, Clone)]
pub struct Graph<C> {
    index: HashMap<C, NodeId>,
    nodes: Vec<Node<C>>,
    edges: Vec<Edge>,
}

impl<C> Default for Graph<C> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }
}

impl<C: Location> Graph<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of intersections in the graph.
    pub fn num_vertices(&self) -> usize {
        self.nodes.len()
    }

    /// Number of directed road segments in the graph.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Locations of every vertex, in insertion order.
    pub fn vertices(&self) -> impl ExactSizeIterator<Item = &C> + '_ {
        self.nodes.iter().map(|node| &node.location)
    }

    /// Add a vertex at `location`.
    ///
    /// Returns `false` and leaves the graph untouched when a vertex already
    /// exists there.
    pub fn add_vertex(&mut self, location: C) -> bool {
        if self.index.contains_key(&location) {
            return false;
        }

        let id = NodeId(self.nodes.len());
        self.index.insert(location.clone(), id);
        self.nodes.push(Node {
            location,
            outgoing: Vec::new(),
        });
        true
    }

    /// Add a directed edge from `from` to `to`.
    ///
    /// Both locations must already be vertices and `length` must be finite and
    /// non-negative. On error the graph is left unchanged. Two-way roads need
    /// one call per direction.
    pub fn add_edge(
        &mut self,
        from: &C,
        to: &C,
        road_name: impl Into<String>,
        road_class: impl Into<RoadClass>,
        length: f64,
    ) -> Result<EdgeId> {
        let start = self.require_vertex(from)?;
        let end = self.require_vertex(to)?;
        if !length.is_finite() || length < 0.0 {
            return Err(Error::InvalidLength { length });
        }

        let id = EdgeId(self.edges.len());
        self.edges.push(Edge::new(
            start,
            end,
            road_name.into(),
            road_class.into(),
            length,
        ));
        self.nodes[start.0].outgoing.push(id);
        Ok(id)
    }

    fn require_vertex(&self, location: &C) -> Result<NodeId> {
        self.node_id(location)
            .ok_or_else(|| Error::UnknownVertex {
                location: location.to_string(),
            })
    }

    /// Resolve a location to its node identifier.
    pub fn node_id(&self, location: &C) -> Option<NodeId> {
        self.index.get(location).copied()
    }

    pub fn contains(&self, location: &C) -> bool {
        self.index.contains_key(location)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node<C>> {
        self.nodes.get(id.0)
    }

    /// Location of a node issued by this graph.
    ///
    /// # Panics
    ///
    /// Panics when `id` was not produced by this graph.
    pub fn location(&self, id: NodeId) -> &C {
        &self.nodes[id.0].location
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.0)
    }

    /// Every edge in the graph, in insertion order.
    pub fn edges(&self) -> impl ExactSizeIterator<Item = &Edge> + '_ {
        self.edges.iter()
    }

    /// Edges leaving `node`, parallel edges included.
    pub fn outgoing(&self, node: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.nodes
            .get(node.0)
            .map(|node| node.outgoing.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(move |edge| &self.edges[edge.0])
    }

    /// Distinct nodes reachable over one outgoing edge.
    ///
    /// Parallel edges collapse to a single neighbour here; searches that need
    /// per-edge costs iterate [`Graph::outgoing`] instead.
    pub fn neighbors(&self, node: NodeId) -> BTreeSet<NodeId> {
        self.outgoing(node).map(Edge::end).collect()
    }

    /// Fastest edge from `from` to `to`, if any connects them.
    pub fn fastest_edge(&self, from: &C, to: &C) -> Option<&Edge> {
        let start = self.node_id(from)?;
        let end = self.node_id(to)?;
        self.outgoing(start)
            .filter(|edge| edge.end == end)
            .min_by(|a, b| a.duration.total_cmp(&b.duration))
    }

    /// Total length and duration along consecutive waypoints, using the
    /// fastest edge for each leg.
    ///
    /// Fails with [`Error::MissingSegment`] naming the first leg that has no
    /// edge.
    pub fn path_metrics(&self, waypoints: &[C]) -> Result<(f64, f64)> {
        waypoints
            .windows(2)
            .try_fold((0.0, 0.0), |(length, duration), pair| {
                let edge = self.fastest_edge(&pair[0], &pair[1]).ok_or_else(|| {
                    Error::MissingSegment {
                        from: pair[0].to_string(),
                        to: pair[1].to_string(),
                    }
                })?;
                Ok((length + edge.length, duration + edge.duration))
            })
    }
}
