//! u-shuttle command-line entry point.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use u_shuttle::evaluation::{CostPolicy, RouteEvaluator};
use u_shuttle::plan::{PlanRequest, Planner};
use u_shuttle::sa::SaConfig;
use u_shuttle::schedule::ScheduleConfig;

mod cli;

use cli::{Cli, Command};

/// Progress lines logged per run.
const PROGRESS_STEPS: usize = 10;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Command::Plan {
            input,
            json,
            seed,
            iterations,
        } => run_plan(&input, json, seed, iterations),
        Command::Evaluate { input } => run_evaluate(&input),
    }
}

fn read_request(path: &Path) -> Result<PlanRequest> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read request file {}", path.display()))?;
    let request: PlanRequest = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse request file {}", path.display()))?;
    Ok(request)
}

fn run_plan(input: &Path, json: bool, seed: Option<u64>, iterations: Option<usize>) -> Result<()> {
    let mut request = read_request(input)?;
    if seed.is_some() {
        request.seed = seed;
    }

    let mut annealing = SaConfig::default();
    if let Some(n) = iterations {
        annealing = annealing.with_max_iterations(n);
    }
    let every = (annealing.max_iterations / PROGRESS_STEPS).max(1);
    let planner = Planner::new(CostPolicy::default(), annealing, ScheduleConfig::default())?;

    let handle = planner.spawn(request);
    for progress in handle.progress() {
        if progress.iteration % every == 0 {
            info!("{}", progress.status);
        }
    }
    let report = handle.join()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}

fn run_evaluate(input: &Path) -> Result<()> {
    let request = read_request(input)?;
    request.validate()?;
    let registry = request.registry()?;

    let evaluator =
        RouteEvaluator::new(request.bus_capacity).with_policy(request.policy.unwrap_or_default());
    let result = evaluator.evaluate(registry.order(), &registry.employee_counts());

    println!("Route: {}", registry.order().join(" → "));
    println!("Employees: {}", registry.total_employees());
    println!("Buses: {}", result.bus_count);
    println!("Cost: {:.2}", result.cost);
    Ok(())
}
