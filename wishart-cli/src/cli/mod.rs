//! Command-line interface for the Wishart clustering pipeline.
//!
//! `run` loads points from a delimited file or from the delay embedding of a
//! chaotic series, clusters them, and reports labels and optional centers.

mod commands;

pub use commands::{
    Cli, CliError, Command, CsvArgs, ExecutionSummary, RunCommand, RunSource, SeriesArgs,
    render_summary, run_cli,
};
