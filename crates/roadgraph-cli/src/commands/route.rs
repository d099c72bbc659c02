//! Route command handler for computing paths between map locations.

use anyhow::{Context, Result};
use clap::ValueEnum;
use tracing::trace;

use roadgraph_lib::{
    plan_route_observed, GeoPoint, Graph, RouteAlgorithm, RouteOutcome, RouteRequest,
    RouteSummary, StraightLineHeuristic,
};

use crate::output::OutputFormat;

/// Search algorithm as spelled on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AlgorithmArg {
    /// Fewest road segments
    Bfs,
    /// Least travel time
    Dijkstra,
    /// Least travel time, guided by straight-line distance
    #[default]
    AStar,
}

impl From<AlgorithmArg> for RouteAlgorithm {
    fn from(value: AlgorithmArg) -> Self {
        match value {
            AlgorithmArg::Bfs => RouteAlgorithm::Bfs,
            AlgorithmArg::Dijkstra => RouteAlgorithm::Dijkstra,
            AlgorithmArg::AStar => RouteAlgorithm::AStar,
        }
    }
}

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    pub from: GeoPoint,
    pub to: GeoPoint,
    pub algorithm: AlgorithmArg,
    /// Reference speed for the A* estimate; the fastest road class when unset.
    pub reference_speed: Option<f64>,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library RouteRequest.
    pub fn to_request(&self) -> Result<RouteRequest<GeoPoint>> {
        let heuristic = match self.reference_speed {
            Some(speed) => StraightLineHeuristic::new(speed)?,
            None => StraightLineHeuristic::default(),
        };

        Ok(RouteRequest::new(self.algorithm.into())
            .with_start(self.from)
            .with_goal(self.to)
            .with_heuristic(heuristic))
    }
}

/// Handle the route subcommand.
pub fn handle_route_command(
    graph: &Graph<GeoPoint>,
    format: OutputFormat,
    args: &RouteCommandArgs,
) -> Result<()> {
    let request = args.to_request()?;

    let outcome = plan_route_observed(graph, &request, |location| {
        trace!(%location, "visited");
    })
    .context("route planning failed")?;

    let plan = match outcome {
        RouteOutcome::Found(plan) => plan,
        RouteOutcome::NotFound => {
            return Err(anyhow::anyhow!(format_route_not_found_message(args)));
        }
    };

    let summary = RouteSummary::from_plan(graph, &plan)
        .context("failed to build route summary for display")?;
    println!("{}", format.render_route(&summary)?);
    Ok(())
}

fn format_route_not_found_message(args: &RouteCommandArgs) -> String {
    format!(
        "No route found between {} and {}. Check that both are map vertices and that one-way roads allow the trip.",
        args.from, args.to
    )
}
