//! Route optimizer entry points.

use std::collections::HashMap;
use std::ops::ControlFlow;

use rand::Rng;
use serde::Serialize;
use tracing::info;

use super::problem::RouteProblem;
use crate::error::Result;
use crate::evaluation::{CostPolicy, Evaluation, RouteEvaluator};
use crate::registry::CompanyRegistry;
use crate::sa::{anneal, seeded_rng, SaConfig, SaProgress};

/// Best ordering found by one optimization run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteOptimum {
    /// Company names in the best visiting order found.
    pub route: Vec<String>,

    /// Cost of `route`.
    pub cost: f64,

    /// Buses needed for `route`.
    pub bus_count: u32,

    /// Evaluation of the caller's original order.
    pub initial: Evaluation,

    /// Moves attempted.
    pub iterations: usize,

    /// Moves accepted as the new current route.
    pub accepted_moves: usize,

    /// Whether the caller stopped the run early.
    pub cancelled: bool,
}

impl RouteOptimum {
    /// Buses saved relative to the original order.
    pub fn buses_saved(&self) -> i64 {
        i64::from(self.initial.bus_count) - i64::from(self.bus_count)
    }
}

/// Searches visiting orders with simulated annealing.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use u_shuttle::optimizer::RouteOptimizer;
/// use u_shuttle::sa::SaConfig;
/// use u_shuttle::evaluation::CostPolicy;
///
/// let config = SaConfig::default().with_seed(42);
/// let optimizer = RouteOptimizer::new(CostPolicy::default(), config).unwrap();
/// let employees = HashMap::from([
///     ("A".to_string(), 24),
///     ("B".to_string(), 10),
///     ("C".to_string(), 14),
/// ]);
///
/// let best = optimizer.optimize(&["B", "C", "A"], &employees, 24);
/// assert_eq!(best.initial.bus_count, 3);
/// assert_eq!(best.bus_count, 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteOptimizer {
    policy: CostPolicy,
    config: SaConfig,
}

impl RouteOptimizer {
    /// Creates an optimizer after validating both the policy and the
    /// annealing configuration.
    pub fn new(policy: CostPolicy, config: SaConfig) -> Result<Self> {
        policy.validate()?;
        config.validate()?;
        Ok(Self { policy, config })
    }

    /// Cost policy used for every evaluation.
    pub fn policy(&self) -> &CostPolicy {
        &self.policy
    }

    /// Annealing configuration.
    pub fn config(&self) -> &SaConfig {
        &self.config
    }

    /// Optimizes the order of `companies`, starting from the order given.
    pub fn optimize<S: AsRef<str>>(
        &self,
        companies: &[S],
        employees: &HashMap<String, u32>,
        bus_capacity: u32,
    ) -> RouteOptimum {
        self.optimize_with_progress(companies, employees, bus_capacity, |_| {
            ControlFlow::Continue(())
        })
    }

    /// Like [`optimize`](Self::optimize), reporting progress before every move.
    ///
    /// Returning [`ControlFlow::Break`] stops the search; the best order
    /// found so far is still returned.
    pub fn optimize_with_progress<S, F>(
        &self,
        companies: &[S],
        employees: &HashMap<String, u32>,
        bus_capacity: u32,
        on_progress: F,
    ) -> RouteOptimum
    where
        S: AsRef<str>,
        F: FnMut(&SaProgress) -> ControlFlow<()>,
    {
        let mut rng = seeded_rng(&self.config);
        self.optimize_with_rng(companies, employees, bus_capacity, &mut rng, on_progress)
    }

    /// Like [`optimize_with_progress`](Self::optimize_with_progress) with a
    /// caller-supplied random source.
    pub fn optimize_with_rng<S, R, F>(
        &self,
        companies: &[S],
        employees: &HashMap<String, u32>,
        bus_capacity: u32,
        rng: &mut R,
        on_progress: F,
    ) -> RouteOptimum
    where
        S: AsRef<str>,
        R: Rng,
        F: FnMut(&SaProgress) -> ControlFlow<()>,
    {
        let names: Vec<&str> = companies.iter().map(AsRef::as_ref).collect();
        let loads = names
            .iter()
            .map(|name| employees.get(*name).copied().unwrap_or(0))
            .collect();
        let evaluator = RouteEvaluator::new(bus_capacity).with_policy(self.policy);
        let problem = RouteProblem::new(loads, evaluator);

        self.solve(&problem, &names, rng, on_progress)
    }

    /// Optimizes a registry's companies starting from registration order.
    pub fn optimize_registry<F>(
        &self,
        registry: &CompanyRegistry,
        bus_capacity: u32,
        on_progress: F,
    ) -> RouteOptimum
    where
        F: FnMut(&SaProgress) -> ControlFlow<()>,
    {
        self.optimize_with_progress(
            registry.order(),
            &registry.employee_counts(),
            bus_capacity,
            on_progress,
        )
    }

    /// Runs independent searches in parallel, one per seed, and keeps the
    /// cheapest result. Ties go to the earlier seed.
    #[cfg(feature = "parallel")]
    pub fn optimize_multi_start<S: AsRef<str> + Sync>(
        &self,
        companies: &[S],
        employees: &HashMap<String, u32>,
        bus_capacity: u32,
        seeds: &[u64],
    ) -> RouteOptimum {
        use rand::rngs::StdRng;
        use rand::SeedableRng;
        use rayon::prelude::*;

        let best = seeds
            .par_iter()
            .enumerate()
            .map(|(idx, &seed)| {
                let mut rng = StdRng::seed_from_u64(seed);
                let result =
                    self.optimize_with_rng(companies, employees, bus_capacity, &mut rng, |_| {
                        ControlFlow::Continue(())
                    });
                (idx, result)
            })
            .min_by(|(ia, a), (ib, b)| a.cost.total_cmp(&b.cost).then(ia.cmp(ib)));

        match best {
            Some((_, result)) => result,
            None => self.optimize(companies, employees, bus_capacity),
        }
    }

    fn solve<R, F>(
        &self,
        problem: &RouteProblem,
        names: &[&str],
        rng: &mut R,
        on_progress: F,
    ) -> RouteOptimum
    where
        R: Rng,
        F: FnMut(&SaProgress) -> ControlFlow<()>,
    {
        let identity: Vec<usize> = (0..problem.len()).collect();
        let initial = problem.evaluate(&identity);

        let result = anneal(problem, &self.config, rng, on_progress);
        let best = problem.evaluate(&result.best);

        info!(
            stops = problem.len(),
            initial_buses = initial.bus_count,
            best_buses = best.bus_count,
            best_cost = best.cost,
            "route optimized"
        );

        RouteOptimum {
            route: result.best.iter().map(|&i| names[i].to_string()).collect(),
            cost: best.cost,
            bus_count: best.bus_count,
            initial,
            iterations: result.iterations,
            accepted_moves: result.accepted_moves,
            cancelled: result.cancelled,
        }
    }
}

/// Optimizes `companies` with the default policy and annealing schedule.
pub fn optimize<S: AsRef<str>>(
    companies: &[S],
    employees: &HashMap<String, u32>,
    bus_capacity: u32,
) -> RouteOptimum {
    RouteOptimizer::default().optimize(companies, employees, bus_capacity)
}
