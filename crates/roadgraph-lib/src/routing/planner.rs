//! Route planning strategies.
//!
//! This module provides the `RoutePlanner` trait and one implementation per
//! search algorithm, letting `plan_route` stay agnostic of which search runs.

use crate::error::Result;
use crate::graph::Graph;
use crate::location::Location;
use crate::path::{find_route_a_star, find_route_bfs, find_route_dijkstra, StraightLineHeuristic};

use super::{RouteAlgorithm, RouteRequest};

/// Trait for route planning strategies.
pub trait RoutePlanner<C: Location>: Send + Sync {
    /// The algorithm identifier for this planner.
    fn algorithm(&self) -> RouteAlgorithm;

    /// Execute the search on the given graph.
    ///
    /// Returns `Ok(Some(path))` if a route is found and `Ok(None)` otherwise.
    fn find_path(
        &self,
        graph: &Graph<C>,
        start: &C,
        goal: &C,
        on_visit: &mut dyn FnMut(&C),
    ) -> Result<Option<Vec<C>>>;
}

/// Breadth-first search planner.
///
/// Finds the route with the fewest road segments, ignoring travel time.
#[derive(Debug, Clone, Default)]
pub struct BfsPlanner;

impl<C: Location> RoutePlanner<C> for BfsPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Bfs
    }

    fn find_path(
        &self,
        graph: &Graph<C>,
        start: &C,
        goal: &C,
        on_visit: &mut dyn FnMut(&C),
    ) -> Result<Option<Vec<C>>> {
        find_route_bfs(graph, start, goal, on_visit)
    }
}

/// Dijkstra's algorithm planner, minimising travel time.
#[derive(Debug, Clone, Default)]
pub struct DijkstraPlanner;

impl<C: Location> RoutePlanner<C> for DijkstraPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Dijkstra
    }

    fn find_path(
        &self,
        graph: &Graph<C>,
        start: &C,
        goal: &C,
        on_visit: &mut dyn FnMut(&C),
    ) -> Result<Option<Vec<C>>> {
        find_route_dijkstra(graph, start, goal, on_visit)
    }
}

/// A* planner guided by a straight-line time estimate.
#[derive(Debug, Clone, Default)]
pub struct AStarPlanner {
    heuristic: StraightLineHeuristic,
}

impl AStarPlanner {
    pub fn new(heuristic: StraightLineHeuristic) -> Self {
        Self { heuristic }
    }

    pub fn heuristic(&self) -> &StraightLineHeuristic {
        &self.heuristic
    }
}

impl<C: Location> RoutePlanner<C> for AStarPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::AStar
    }

    fn find_path(
        &self,
        graph: &Graph<C>,
        start: &C,
        goal: &C,
        on_visit: &mut dyn FnMut(&C),
    ) -> Result<Option<Vec<C>>> {
        find_route_a_star(graph, start, goal, &self.heuristic, on_visit)
    }
}

/// Select the appropriate planner for a given request.
pub fn select_planner<C: Location>(request: &RouteRequest<C>) -> Box<dyn RoutePlanner<C>> {
    match request.algorithm {
        RouteAlgorithm::Bfs => Box::new(BfsPlanner),
        RouteAlgorithm::Dijkstra => Box::new(DijkstraPlanner),
        RouteAlgorithm::AStar => Box::new(AStarPlanner::new(request.heuristic)),
    }
}
