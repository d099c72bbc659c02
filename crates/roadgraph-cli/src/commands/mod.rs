// One module per CLI subcommand; main.rs only parses and dispatches.

pub mod route;
pub mod stats;
