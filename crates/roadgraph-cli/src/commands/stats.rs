use anyhow::Result;
use roadgraph_lib::{GeoPoint, Graph};

use crate::output::OutputFormat;

/// Print vertex and edge counts for the loaded map.
pub fn handle_stats_command(graph: &Graph<GeoPoint>, format: OutputFormat) -> Result<()> {
    println!("{}", format.render_stats(graph.num_vertices(), graph.num_edges())?);
    Ok(())
}
