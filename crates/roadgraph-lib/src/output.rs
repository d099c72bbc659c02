use std::fmt::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::location::Location;
use crate::road::RoadClass;
use crate::routing::{RouteAlgorithm, RoutePlan};

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    PlainText,
    RichText,
}

/// Road segment used to arrive at a step.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteLeg {
    pub road_name: String,
    pub road_class: RoadClass,
    pub length: f64,
    pub duration: f64,
}

impl RouteLeg {
    fn display_name(&self) -> &str {
        if self.road_name.is_empty() {
            "<unnamed road>"
        } else {
            &self.road_name
        }
    }
}

/// Waypoint of a planned route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteStep {
    pub index: usize,
    pub location: String,
    /// Absent for the first step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival: Option<RouteLeg>,
    pub elapsed: f64,
}

/// Structured representation of a planned route that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub algorithm: RouteAlgorithm,
    pub start: String,
    pub goal: String,
    pub hops: usize,
    pub visited: usize,
    pub total_length: f64,
    pub total_duration: f64,
    pub steps: Vec<RouteStep>,
}

impl RouteSummary {
    /// Convert a [`RoutePlan`] into a summary with per-leg road details.
    ///
    /// Each leg uses the fastest edge between consecutive waypoints, the
    /// same edge the duration-minimising searches relax.
    pub fn from_plan<C: Location>(graph: &Graph<C>, plan: &RoutePlan<C>) -> Result<Self> {
        if plan.steps.is_empty() {
            return Err(Error::EmptyRoutePlan);
        }

        let mut elapsed = 0.0;
        let mut steps = Vec::with_capacity(plan.steps.len());
        for (index, location) in plan.steps.iter().enumerate() {
            let arrival = match index.checked_sub(1).map(|prev| &plan.steps[prev]) {
                Some(previous) => {
                    let edge = graph.fastest_edge(previous, location).ok_or_else(|| {
                        Error::MissingSegment {
                            from: previous.to_string(),
                            to: location.to_string(),
                        }
                    })?;
                    elapsed += edge.duration();
                    Some(RouteLeg {
                        road_name: edge.road_name().to_string(),
                        road_class: edge.road_class().clone(),
                        length: edge.length(),
                        duration: edge.duration(),
                    })
                }
                None => None,
            };
            steps.push(RouteStep {
                index,
                location: location.to_string(),
                arrival,
                elapsed,
            });
        }

        let total_length: f64 = steps
            .iter()
            .filter_map(|step| step.arrival.as_ref())
            .map(|leg| leg.length)
            .sum();

        Ok(Self {
            algorithm: plan.algorithm,
            start: plan.start.to_string(),
            goal: plan.goal.to_string(),
            hops: plan.hop_count(),
            visited: plan.visited,
            total_length,
            total_duration: elapsed,
            steps,
        })
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::RichText => self.render_rich(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route: {} -> {} ({} hops, algorithm: {}, visited: {})",
            self.start, self.goal, self.hops, self.algorithm, self.visited
        );
        for step in &self.steps {
            match &step.arrival {
                Some(leg) => {
                    let _ = writeln!(
                        buffer,
                        "{:>3}: {} via {} [{}] {:.3} in {:.4} (t={:.4})",
                        step.index,
                        step.location,
                        leg.display_name(),
                        leg.road_class,
                        leg.length,
                        leg.duration,
                        step.elapsed
                    );
                }
                None => {
                    let _ = writeln!(buffer, "{:>3}: {} (start)", step.index, step.location);
                }
            }
        }
        let _ = writeln!(
            buffer,
            "Total: {:.3} in {:.4}",
            self.total_length, self.total_duration
        );
        buffer
    }

    fn render_rich(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "**Route** _{} → {}_ ({} hops, algorithm: `{}`, visited: {})",
            self.start, self.goal, self.hops, self.algorithm, self.visited
        );
        for step in &self.steps {
            match &step.arrival {
                Some(leg) => {
                    let _ = writeln!(
                        buffer,
                        "* {:>2}. **{}** via _{}_ (`{}`, {:.3} in {:.4})",
                        step.index,
                        step.location,
                        leg.display_name(),
                        leg.road_class,
                        leg.length,
                        leg.duration
                    );
                }
                None => {
                    let _ = writeln!(buffer, "* {:>2}. **{}**", step.index, step.location);
                }
            }
        }
        let _ = writeln!(
            buffer,
            "**Total:** {:.3} in {:.4}",
            self.total_length, self.total_duration
        );
        buffer
    }
}
