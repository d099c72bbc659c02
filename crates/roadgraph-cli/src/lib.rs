//! Road graph CLI library.
//!
//! Subcommand handlers and output formatting shared by the `roadgraph`
//! binary.

pub mod commands;
pub mod output;
