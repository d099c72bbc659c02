use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use roadgraph_cli::commands::route::{handle_route_command, AlgorithmArg, RouteCommandArgs};
use roadgraph_cli::commands::stats::handle_stats_command;
use roadgraph_cli::output::OutputFormat;
use roadgraph_lib::{load_road_map, GeoPoint};

#[derive(Parser, Debug)]
#[command(author, version, about = "Road map routing utilities")]
struct Cli {
    /// Road map file to load.
    #[arg(long)]
    map: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute a route between two locations on the map.
    Route {
        /// Starting location as `<latitude>,<longitude>`.
        #[arg(long = "from", allow_hyphen_values = true)]
        from: GeoPoint,
        /// Destination location as `<latitude>,<longitude>`.
        #[arg(long = "to", allow_hyphen_values = true)]
        to: GeoPoint,
        /// Search algorithm.
        #[arg(long, value_enum, default_value_t = AlgorithmArg::AStar)]
        algorithm: AlgorithmArg,
        /// Speed used by the A* estimate (distance per time unit).
        #[arg(long)]
        reference_speed: Option<f64>,
    },
    /// Report vertex and edge counts.
    Stats,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let graph = load_road_map(&cli.map)
        .with_context(|| format!("failed to load road map from {}", cli.map.display()))?;

    match cli.command {
        Command::Route {
            from,
            to,
            algorithm,
            reference_speed,
        } => {
            let args = RouteCommandArgs {
                from,
                to,
                algorithm,
                reference_speed,
            };
            handle_route_command(&graph, cli.format, &args)
        }
        Command::Stats => handle_stats_command(&graph, cli.format),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
