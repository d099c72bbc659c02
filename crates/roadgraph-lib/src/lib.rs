//! Road network library entry points.
//!
//! This crate models a road network as a directed graph keyed by location,
//! loads it from map files, and answers shortest-route queries by hop count
//! (BFS) or travel time (Dijkstra, A*). Higher-level consumers such as the
//! CLI should only depend on the items exported here instead of
//! reimplementing behavior.
//!

#![deny(warnings)]

pub mod error;
pub mod graph;
pub mod loader;
pub mod location;
pub mod output;
pub mod path;
pub mod road;
pub mod routing;

pub use error::{Error, Result};
pub use graph::{Edge, EdgeId, Graph, Node, NodeId};
pub use loader::{load_road_map, parse_road_map};
pub use location::{GeoPoint, Location};
pub use output::{RouteLeg, RouteRenderMode, RouteStep, RouteSummary};
pub use path::{
    find_route, find_route_a_star, find_route_bfs, find_route_dijkstra, reconstruct_path,
    StraightLineHeuristic,
};
pub use road::RoadClass;
pub use routing::{
    plan_route, plan_route_observed, select_planner, AStarPlanner, BfsPlanner, DijkstraPlanner,
    Endpoint, RouteAlgorithm, RouteOutcome, RoutePlan, RoutePlanner, RouteRequest,
};
