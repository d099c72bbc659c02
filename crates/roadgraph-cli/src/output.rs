//! Output formatting for command results.

use anyhow::{Context, Result};
use clap::ValueEnum;
use roadgraph_lib::{RouteRenderMode, RouteSummary};
use serde_json::json;

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text, one line per waypoint
    #[default]
    Text,
    /// Markdown
    Rich,
    /// JSON document
    Json,
}

impl OutputFormat {
    pub fn render_route(self, summary: &RouteSummary) -> Result<String> {
        match self {
            OutputFormat::Text => Ok(summary.render(RouteRenderMode::PlainText)),
            OutputFormat::Rich => Ok(summary.render(RouteRenderMode::RichText)),
            OutputFormat::Json => {
                serde_json::to_string_pretty(summary).context("failed to serialise route summary")
            }
        }
    }

    pub fn render_stats(self, vertices: usize, edges: usize) -> Result<String> {
        match self {
            OutputFormat::Text => Ok(format!("Vertices: {vertices}\nEdges: {edges}")),
            OutputFormat::Rich => Ok(format!("**Vertices:** {vertices}\n**Edges:** {edges}")),
            OutputFormat::Json => {
                serde_json::to_string_pretty(&json!({ "vertices": vertices, "edges": edges }))
                    .context("failed to serialise graph statistics")
            }
        }
    }
}
