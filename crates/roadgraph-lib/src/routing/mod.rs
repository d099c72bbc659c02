//! Route planning on top of the raw searches.
//!
//! This module provides:
//! - [`RouteAlgorithm`] - Supported routing algorithms (BFS, Dijkstra, A*)
//! - [`RouteRequest`] - High-level route planning request
//! - [`RoutePlan`] - Planned route with totals
//! - [`plan_route`] - Main entry point for computing routes
//!
//! # Strategy Pattern
//!
//! Each algorithm is wrapped in a [`RoutePlanner`] implementation and picked
//! by [`select_planner`], so `plan_route` never matches on the algorithm
//! itself.
//!
//! # Example
//!
//! ```
//! use roadgraph_lib::{plan_route, GeoPoint, Graph, RouteRequest};
//!
//! let a = GeoPoint::new(0.0, 0.0);
//! let b = GeoPoint::new(0.0, 0.1);
//! let mut graph = Graph::new();
//! graph.add_vertex(a);
//! graph.add_vertex(b);
//! graph.add_edge(&a, &b, "Main St", "primary", 11.1).unwrap();
//!
//! let plan = plan_route(&graph, &RouteRequest::dijkstra(a, b))
//!     .unwrap()
//!     .into_plan()
//!     .unwrap();
//! assert_eq!(plan.hop_count(), 1);
//! ```

mod planner;

pub use planner::{select_planner, AStarPlanner, BfsPlanner, DijkstraPlanner, RoutePlanner};

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::location::Location;
use crate::path::StraightLineHeuristic;

/// Supported routing algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RouteAlgorithm {
    /// Breadth-first search (fewest road segments).
    Bfs,
    /// Dijkstra's algorithm (least travel time).
    Dijkstra,
    /// A* search (least travel time, heuristic guided).
    #[default]
    #[serde(rename = "a-star")]
    AStar,
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::Bfs => "bfs",
            RouteAlgorithm::Dijkstra => "dijkstra",
            RouteAlgorithm::AStar => "a-star",
        };
        f.write_str(value)
    }
}

/// Which end of a route a request is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Endpoint::Start => "start",
            Endpoint::Goal => "goal",
        })
    }
}

/// High-level route planning request.
///
/// Endpoints are optional so requests can be assembled incrementally; a
/// request that still lacks either one is rejected by [`plan_route`].
#[derive(Debug, Clone)]
pub struct RouteRequest<C> {
    pub start: Option<C>,
    pub goal: Option<C>,
    pub algorithm: RouteAlgorithm,
    /// Only consulted by A*.
    pub heuristic: StraightLineHeuristic,
}

impl<C> Default for RouteRequest<C> {
    fn default() -> Self {
        Self {
            start: None,
            goal: None,
            algorithm: RouteAlgorithm::default(),
            heuristic: StraightLineHeuristic::default(),
        }
    }
}

impl<C> RouteRequest<C> {
    pub fn new(algorithm: RouteAlgorithm) -> Self {
        Self {
            algorithm,
            ..Self::default()
        }
    }

    /// Convenience constructor for BFS routes.
    pub fn bfs(start: C, goal: C) -> Self {
        Self::new(RouteAlgorithm::Bfs).with_start(start).with_goal(goal)
    }

    /// Convenience constructor for Dijkstra routes.
    pub fn dijkstra(start: C, goal: C) -> Self {
        Self::new(RouteAlgorithm::Dijkstra)
            .with_start(start)
            .with_goal(goal)
    }

    /// Convenience constructor for A* routes with the default heuristic.
    pub fn a_star(start: C, goal: C) -> Self {
        Self::new(RouteAlgorithm::AStar)
            .with_start(start)
            .with_goal(goal)
    }

    pub fn with_start(mut self, start: C) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_goal(mut self, goal: C) -> Self {
        self.goal = Some(goal);
        self
    }

    pub fn with_heuristic(mut self, heuristic: StraightLineHeuristic) -> Self {
        self.heuristic = heuristic;
        self
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, Serialize)]
pub struct RoutePlan<C> {
    pub algorithm: RouteAlgorithm,
    pub start: C,
    pub goal: C,
    /// Waypoints from start to goal, both included.
    pub steps: Vec<C>,
    /// Nodes the search visited before stopping.
    pub visited: usize,
    pub total_length: f64,
    pub total_duration: f64,
}

impl<C> RoutePlan<C> {
    /// Number of road segments in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Result of planning: either a route or proof that none exists.
#[derive(Debug, Clone)]
pub enum RouteOutcome<C> {
    Found(RoutePlan<C>),
    NotFound,
}

impl<C> RouteOutcome<C> {
    pub fn is_found(&self) -> bool {
        matches!(self, RouteOutcome::Found(_))
    }

    pub fn into_plan(self) -> Option<RoutePlan<C>> {
        match self {
            RouteOutcome::Found(plan) => Some(plan),
            RouteOutcome::NotFound => None,
        }
    }
}

/// Compute a route for the given request.
pub fn plan_route<C: Location>(
    graph: &Graph<C>,
    request: &RouteRequest<C>,
) -> Result<RouteOutcome<C>> {
    plan_route_observed(graph, request, |_| {})
}

/// Compute a route, reporting every visited node to `on_visit`.
pub fn plan_route_observed<C, F>(
    graph: &Graph<C>,
    request: &RouteRequest<C>,
    mut on_visit: F,
) -> Result<RouteOutcome<C>>
where
    C: Location,
    F: FnMut(&C),
{
    let start = request.start.as_ref().ok_or(Error::MissingEndpoint {
        endpoint: Endpoint::Start,
    })?;
    let goal = request.goal.as_ref().ok_or(Error::MissingEndpoint {
        endpoint: Endpoint::Goal,
    })?;

    let planner = select_planner(request);
    let mut visited = 0usize;
    let route = planner.find_path(graph, start, goal, &mut |location: &C| {
        visited += 1;
        on_visit(location);
    })?;

    let Some(steps) = route else {
        debug!(algorithm = %planner.algorithm(), %start, %goal, visited, "no route");
        return Ok(RouteOutcome::NotFound);
    };

    let (total_length, total_duration) = graph.path_metrics(&steps)?;

    Ok(RouteOutcome::Found(RoutePlan {
        algorithm: planner.algorithm(),
        start: start.clone(),
        goal: goal.clone(),
        steps,
        visited,
        total_length,
        total_duration,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::GeoPoint;

    fn line_graph() -> (Graph<GeoPoint>, GeoPoint, GeoPoint, GeoPoint) {
        let (a, b, c) = (
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 1.0),
            GeoPoint::new(0.0, 2.0),
        );
        let mut graph = Graph::new();
        for p in [a, b, c] {
            graph.add_vertex(p);
        }
        graph.add_edge(&a, &b, "First", "motorway", 140.0).unwrap();
        graph.add_edge(&b, &c, "Second", "service", 40.0).unwrap();
        (graph, a, b, c)
    }

    #[test]
    fn algorithm_display_and_serde_agree() {
        for algorithm in [
            RouteAlgorithm::Bfs,
            RouteAlgorithm::Dijkstra,
            RouteAlgorithm::AStar,
        ] {
            let json = serde_json::to_string(&algorithm).unwrap();
            assert_eq!(json, format!("\"{algorithm}\""));
        }
        assert_eq!(RouteAlgorithm::default(), RouteAlgorithm::AStar);
    }

    #[test]
    fn missing_endpoints_are_rejected_for_every_algorithm() {
        let (graph, a, _, _) = line_graph();
        for algorithm in [
            RouteAlgorithm::Bfs,
            RouteAlgorithm::Dijkstra,
            RouteAlgorithm::AStar,
        ] {
            let no_start = RouteRequest::new(algorithm).with_goal(a);
            assert!(matches!(
                plan_route(&graph, &no_start),
                Err(Error::MissingEndpoint {
                    endpoint: Endpoint::Start
                })
            ));

            let no_goal = RouteRequest::new(algorithm).with_start(a);
            assert!(matches!(
                plan_route(&graph, &no_goal),
                Err(Error::MissingEndpoint {
                    endpoint: Endpoint::Goal
                })
            ));
        }
    }

    #[test]
    fn plan_totals_follow_the_route() {
        let (graph, a, b, c) = line_graph();
        let plan = plan_route(&graph, &RouteRequest::a_star(a, c))
            .unwrap()
            .into_plan()
            .expect("route exists");

        assert_eq!(plan.algorithm, RouteAlgorithm::AStar);
        assert_eq!(plan.steps, vec![a, b, c]);
        assert_eq!(plan.hop_count(), 2);
        assert!((plan.total_length - 180.0).abs() < 1e-9);
        assert!((plan.total_duration - 4.0).abs() < 1e-9);
        assert!(plan.visited >= 3);
    }

    #[test]
    fn unreachable_goal_is_not_an_error() {
        let (graph, a, _, c) = line_graph();
        let outcome = plan_route(&graph, &RouteRequest::bfs(c, a)).unwrap();
        assert!(!outcome.is_found());
        assert!(outcome.into_plan().is_none());
    }

    #[test]
    fn observer_sees_every_counted_visit() {
        let (graph, a, _, c) = line_graph();
        let mut seen = Vec::new();
        let plan = plan_route_observed(&graph, &RouteRequest::dijkstra(a, c), |p| seen.push(*p))
            .unwrap()
            .into_plan()
            .unwrap();

        assert_eq!(seen.len(), plan.visited);
        assert_eq!(seen.first(), Some(&a));
        assert_eq!(seen.last(), Some(&c));
    }
}
