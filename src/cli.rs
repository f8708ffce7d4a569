//! CLI argument parsing for the u-shuttle binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "u-shuttle", version, about = "Employee shuttle route planner")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Optimize the stop order and print the trip schedule
    Plan {
        /// JSON plan request file
        #[arg(short, long)]
        input: PathBuf,

        /// Print the report as JSON instead of text
        #[arg(long)]
        json: bool,

        /// Fixed seed, overrides the request's seed
        #[arg(long)]
        seed: Option<u64>,

        /// Annealing moves to attempt (at least 1)
        #[arg(long, value_parser = parse_iterations)]
        iterations: Option<usize>,
    },
    /// Score the request's route as given, without optimizing
    Evaluate {
        /// JSON plan request file
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn parse_iterations(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}
