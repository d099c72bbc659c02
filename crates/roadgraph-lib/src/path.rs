use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};

use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId};
use crate::location::Location;
use crate::road::RoadClass;

/// Straight-line time estimate used to guide A*.
///
/// `h(n) = distance(n, goal) / reference_speed`. The estimate never exceeds
/// the true remaining time as long as no road is faster than the reference
/// speed and no edge is shorter than the straight line between its endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StraightLineHeuristic {
    reference_speed: f64,
}

impl StraightLineHeuristic {
    pub fn new(reference_speed: f64) -> Result<Self> {
        if !reference_speed.is_finite() || reference_speed <= 0.0 {
            return Err(Error::InvalidReferenceSpeed {
                speed: reference_speed,
            });
        }
        Ok(Self { reference_speed })
    }

    pub fn reference_speed(&self) -> f64 {
        self.reference_speed
    }

    pub fn estimate<C: Location>(&self, from: &C, goal: &C) -> f64 {
        from.distance(goal) / self.reference_speed
    }
}

impl Default for StraightLineHeuristic {
    fn default() -> Self {
        Self {
            reference_speed: RoadClass::MAX_SPEED,
        }
    }
}

/// Find a route between `start` and `goal` using breadth-first search
/// without observing visits.
pub fn find_route<C: Location>(graph: &Graph<C>, start: &C, goal: &C) -> Result<Option<Vec<C>>> {
    find_route_bfs(graph, start, goal, |_| {})
}

/// Run breadth-first search; the result has the fewest hops.
///
/// `on_visit` fires once per dequeued node, in dequeue order. Returns
/// `Ok(None)` when the goal is unreachable or either location is not a
/// vertex.
pub fn find_route_bfs<C, F>(
    graph: &Graph<C>,
    start: &C,
    goal: &C,
    on_visit: F,
) -> Result<Option<Vec<C>>>
where
    C: Location,
    F: FnMut(&C),
{
    let Some((start, goal)) = resolve(graph, start, goal) else {
        return Ok(None);
    };
    let tree = bfs_tree(graph, start, goal, on_visit);
    finish(graph, "bfs", &tree, start, goal)
}

/// Run Dijkstra's algorithm; the result minimises summed edge duration.
pub fn find_route_dijkstra<C, F>(
    graph: &Graph<C>,
    start: &C,
    goal: &C,
    on_visit: F,
) -> Result<Option<Vec<C>>>
where
    C: Location,
    F: FnMut(&C),
{
    let Some((start, goal)) = resolve(graph, start, goal) else {
        return Ok(None);
    };
    let tree = dijkstra_tree(graph, start, goal, on_visit);
    finish(graph, "dijkstra", &tree, start, goal)
}

/// Run A* search guided by `heuristic`.
///
/// With an admissible heuristic the result has the same total duration as
/// [`find_route_dijkstra`], usually after visiting fewer nodes.
pub fn find_route_a_star<C, F>(
    graph: &Graph<C>,
    start: &C,
    goal: &C,
    heuristic: &StraightLineHeuristic,
    on_visit: F,
) -> Result<Option<Vec<C>>>
where
    C: Location,
    F: FnMut(&C),
{
    let Some((start, goal)) = resolve(graph, start, goal) else {
        return Ok(None);
    };
    let tree = a_star_tree(graph, start, goal, heuristic, on_visit);
    finish(graph, "a_star", &tree, start, goal)
}

fn resolve<C: Location>(graph: &Graph<C>, start: &C, goal: &C) -> Option<(NodeId, NodeId)> {
    Some((graph.node_id(start)?, graph.node_id(goal)?))
}

fn finish<C: Location>(
    graph: &Graph<C>,
    algorithm: &'static str,
    tree: &SearchTree,
    start: NodeId,
    goal: NodeId,
) -> Result<Option<Vec<C>>> {
    debug!(
        algorithm,
        visited = tree.visited,
        found = tree.found,
        "search complete"
    );
    if !tree.found {
        return Ok(None);
    }
    reconstruct_path(graph, &tree.parents, start, goal).map(Some)
}

/// Outcome of one search run: parent pointers, finalised nodes, and
/// whether the goal was reached.
#[derive(Debug, Default)]
struct SearchTree {
    parents: HashMap<NodeId, NodeId>,
    settled: HashSet<NodeId>,
    costs: HashMap<NodeId, f64>,
    visited: usize,
    found: bool,
}

fn bfs_tree<C, F>(graph: &Graph<C>, start: NodeId, goal: NodeId, mut on_visit: F) -> SearchTree
where
    C: Location,
    F: FnMut(&C),
{
    let mut tree = SearchTree::default();
    let mut queue = VecDeque::new();

    // Marked at enqueue time so every node enters the queue at most once.
    tree.settled.insert(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        tree.visited += 1;
        on_visit(graph.location(current));

        if current == goal {
            tree.found = true;
            break;
        }

        for next in graph.neighbors(current) {
            if tree.settled.insert(next) {
                tree.parents.insert(next, current);
                queue.push_back(next);
            }
        }
    }

    tree
}

fn dijkstra_tree<C, F>(graph: &Graph<C>, start: NodeId, goal: NodeId, mut on_visit: F) -> SearchTree
where
    C: Location,
    F: FnMut(&C),
{
    let mut tree = SearchTree::default();
    let mut queue = BinaryHeap::new();

    tree.costs.insert(start, 0.0);
    queue.push(QueueEntry::new(start, 0.0));

    while let Some(entry) = queue.pop() {
        // Later duplicates of a finalised node are stale.
        if !tree.settled.insert(entry.node) {
            continue;
        }
        tree.visited += 1;
        on_visit(graph.location(entry.node));

        if entry.node == goal {
            tree.found = true;
            break;
        }

        let current_cost = entry.cost.0;
        for edge in graph.outgoing(entry.node) {
            let next = edge.end();
            if tree.settled.contains(&next) {
                continue;
            }

            let candidate = current_cost + edge.duration();
            if candidate < tree.costs.get(&next).copied().unwrap_or(f64::INFINITY) {
                tree.costs.insert(next, candidate);
                tree.parents.insert(next, entry.node);
                queue.push(QueueEntry::new(next, candidate));
            }
        }
    }

    tree
}

fn a_star_tree<C, F>(
    graph: &Graph<C>,
    start: NodeId,
    goal: NodeId,
    heuristic: &StraightLineHeuristic,
    mut on_visit: F,
) -> SearchTree
where
    C: Location,
    F: FnMut(&C),
{
    let mut tree = SearchTree::default();
    let mut scores: HashMap<NodeId, f64> = HashMap::new();
    let mut queue = BinaryHeap::new();
    let goal_location = graph.location(goal);

    let start_estimate = heuristic.estimate(graph.location(start), goal_location);
    tree.costs.insert(start, 0.0);
    scores.insert(start, start_estimate);
    queue.push(AStarEntry::new(start, 0.0, start_estimate));

    while let Some(entry) = queue.pop() {
        if !tree.settled.insert(entry.node) {
            continue;
        }
        tree.visited += 1;
        on_visit(graph.location(entry.node));

        if entry.node == goal {
            tree.found = true;
            break;
        }

        let current_cost = entry.cost.0;
        for edge in graph.outgoing(entry.node) {
            let next = edge.end();
            if tree.settled.contains(&next) {
                continue;
            }

            let tentative_cost = current_cost + edge.duration();
            let estimate = heuristic.estimate(graph.location(next), goal_location);
            let tentative_score = tentative_cost + estimate;
            if tentative_score < scores.get(&next).copied().unwrap_or(f64::INFINITY) {
                scores.insert(next, tentative_score);
                tree.costs.insert(next, tentative_cost);
                tree.parents.insert(next, entry.node);
                queue.push(AStarEntry::new(next, tentative_cost, estimate));
            }
        }
    }

    tree
}

/// Walk parent pointers back from `goal` to `start` and return the
/// locations in travel order, both endpoints included.
///
/// The walk stops on reaching `start` itself, so the start never needs a
/// parent entry. A missing link, a walk longer than the parent map (a
/// cycle) or a node id this graph never issued fails with
/// [`Error::CorruptPath`].
pub fn reconstruct_path<C: Location>(
    graph: &Graph<C>,
    parents: &HashMap<NodeId, NodeId>,
    start: NodeId,
    goal: NodeId,
) -> Result<Vec<C>> {
    let mut path = vec![location_of(graph, goal)?];
    let mut current = goal;

    while current != start {
        if path.len() > parents.len() {
            return Err(corrupt(graph, current));
        }
        current = *parents
            .get(&current)
            .ok_or_else(|| corrupt(graph, current))?;
        path.push(location_of(graph, current)?);
    }

    path.reverse();
    Ok(path)
}

fn location_of<C: Location>(graph: &Graph<C>, id: NodeId) -> Result<C> {
    graph
        .node(id)
        .map(|node| node.location().clone())
        .ok_or_else(|| corrupt(graph, id))
}

fn corrupt<C: Location>(graph: &Graph<C>, at: NodeId) -> Error {
    let at = match graph.node(at) {
        Some(node) => node.location().to_string(),
        None => format!("unknown node {at}"),
    };
    Error::CorruptPath { at }
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: NodeId,
    cost: FloatOrd,
}

impl QueueEntry {
    fn new(node: NodeId, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct AStarEntry {
    node: NodeId,
    cost: FloatOrd,
    score: FloatOrd,
}

impl AStarEntry {
    fn new(node: NodeId, cost: f64, heuristic: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
            score: FloatOrd(cost + heuristic),
        }
    }
}

impl Ord for AStarEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for AStarEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
