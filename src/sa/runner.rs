//! SA execution loop.

use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use super::config::SaConfig;
use super::types::{SaProblem, SaProgress};
use crate::error::Result;

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
pub struct SaResult<S: Clone> {
    /// The best solution found.
    pub best: S,

    /// Cost of the best solution.
    pub best_cost: f64,

    /// Cost of the starting solution.
    pub initial_cost: f64,

    /// Total number of iterations (neighbor evaluations).
    pub iterations: usize,

    /// Final temperature when the algorithm stopped.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of improving moves.
    pub improving_moves: usize,

    /// Whether the run was stopped by the caller.
    pub cancelled: bool,

    /// Best cost sampled at regular intervals for history tracking.
    pub cost_history: Vec<f64>,
}

/// Executes the Simulated Annealing algorithm.
pub struct SaRunner;

impl SaRunner {
    /// Runs SA optimization.
    pub fn run<P: SaProblem>(problem: &P, config: &SaConfig) -> Result<SaResult<P::Solution>> {
        Self::run_with_progress(problem, config, |_| ControlFlow::Continue(()))
    }

    /// Runs SA with an optional cancellation token, checked before every move.
    pub fn run_with_cancel<P: SaProblem>(
        problem: &P,
        config: &SaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SaResult<P::Solution>> {
        Self::run_with_progress(problem, config, |_| match cancel {
            Some(ref flag) if flag.load(Ordering::Relaxed) => ControlFlow::Break(()),
            _ => ControlFlow::Continue(()),
        })
    }

    /// Runs SA and reports progress before every move.
    ///
    /// Returning [`ControlFlow::Break`] from the callback stops the run;
    /// the best solution found so far is still returned.
    pub fn run_with_progress<P, F>(
        problem: &P,
        config: &SaConfig,
        on_progress: F,
    ) -> Result<SaResult<P::Solution>>
    where
        P: SaProblem,
        F: FnMut(&SaProgress) -> ControlFlow<()>,
    {
        config.validate()?;
        let mut rng = seeded_rng(config);
        Ok(anneal(problem, config, &mut rng, on_progress))
    }

    /// Runs SA with a caller-supplied random source. `config.seed` is ignored.
    pub fn run_with_rng<P, R, F>(
        problem: &P,
        config: &SaConfig,
        rng: &mut R,
        on_progress: F,
    ) -> Result<SaResult<P::Solution>>
    where
        P: SaProblem,
        R: Rng,
        F: FnMut(&SaProgress) -> ControlFlow<()>,
    {
        config.validate()?;
        Ok(anneal(problem, config, rng, on_progress))
    }
}

/// Builds the run's random source from `config.seed`, or a fresh seed.
pub(crate) fn seeded_rng(config: &SaConfig) -> StdRng {
    let seed = config.seed.unwrap_or_else(rand::random);
    StdRng::seed_from_u64(seed)
}

/// The annealing loop. `config` must already be validated.
pub(crate) fn anneal<P, R, F>(
    problem: &P,
    config: &SaConfig,
    rng: &mut R,
    mut on_progress: F,
) -> SaResult<P::Solution>
where
    P: SaProblem,
    R: Rng,
    F: FnMut(&SaProgress) -> ControlFlow<()>,
{
    let mut current = problem.initial_solution(rng);
    let mut current_cost = problem.cost(&current);
    let initial_cost = current_cost;
    let mut best = current.clone();
    let mut best_cost = current_cost;

    let mut temperature = config.initial_temperature;
    let mut total_iterations = 0usize;
    let mut accepted_moves = 0usize;
    let mut improving_moves = 0usize;
    let mut cancelled = false;

    let history_interval = 100.max(config.iterations_per_temperature);
    let mut cost_history = vec![best_cost];

    debug!(
        initial_cost,
        initial_temperature = config.initial_temperature,
        max_iterations = config.max_iterations,
        "annealing started"
    );

    'levels: while temperature > config.min_temperature {
        if !problem.has_neighbors(&current) {
            break;
        }

        for _ in 0..config.iterations_per_temperature {
            if config.max_iterations > 0 && total_iterations >= config.max_iterations {
                break 'levels;
            }

            let progress = SaProgress {
                iteration: total_iterations,
                max_iterations: config.max_iterations,
                temperature,
                current_cost,
                best_cost,
            };
            if on_progress(&progress).is_break() {
                cancelled = true;
                break 'levels;
            }

            let neighbor = problem.neighbor(&current, rng);
            let neighbor_cost = problem.cost(&neighbor);
            let delta = neighbor_cost - current_cost;

            // The best tracker looks at every neighbor, accepted or not.
            if neighbor_cost < best_cost {
                best = neighbor.clone();
                best_cost = neighbor_cost;
                trace!(iteration = total_iterations, best_cost, "new best");
            }

            // Metropolis acceptance criterion
            let accept = if delta < 0.0 {
                improving_moves += 1;
                true
            } else {
                let probability = (-delta / temperature).exp();
                rng.random_range(0.0..1.0) < probability
            };

            if accept {
                current = neighbor;
                current_cost = neighbor_cost;
                accepted_moves += 1;
            }

            total_iterations += 1;

            if total_iterations.is_multiple_of(history_interval) {
                cost_history.push(best_cost);
            }
        }

        temperature *= config.cooling_rate;
    }

    if cost_history
        .last()
        .is_none_or(|&last| (last - best_cost).abs() > 1e-15)
    {
        cost_history.push(best_cost);
    }

    debug!(
        best_cost,
        iterations = total_iterations,
        accepted_moves,
        improving_moves,
        cancelled,
        "annealing finished"
    );

    SaResult {
        best,
        best_cost,
        initial_cost,
        iterations: total_iterations,
        final_temperature: temperature,
        accepted_moves,
        improving_moves,
        cancelled,
        cost_history,
    }
}
