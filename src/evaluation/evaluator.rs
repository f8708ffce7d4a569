//! Greedy multi-bus loading simulation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::policy::CostPolicy;

/// Outcome of evaluating one route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Weighted cost: buses first, empty seats second.
    pub cost: f64,

    /// Number of bus passes needed, at most `CostPolicy::max_passes`.
    pub bus_count: u32,
}

impl Evaluation {
    /// Result for a route with nobody to carry.
    pub const EMPTY: Evaluation = Evaluation {
        cost: 0.0,
        bus_count: 0,
    };
}

/// Evaluates a visiting order by simulating repeated bus passes.
///
/// Each pass starts empty and walks the route in order, boarding at every
/// stop as many waiting employees as the free seats and the per-stop cap
/// allow. Passes repeat until everyone is aboard, a pass boards nobody, or
/// the pass cap is reached.
///
/// # Examples
///
/// ```
/// use u_shuttle::evaluation::RouteEvaluator;
///
/// let evaluator = RouteEvaluator::new(22);
/// let result = evaluator.evaluate_loads([10, 15, 8]);
/// assert_eq!(result.bus_count, 2);
/// assert_eq!(result.cost, 2110.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RouteEvaluator {
    bus_capacity: u32,
    policy: CostPolicy,
}

impl RouteEvaluator {
    /// Creates an evaluator with the default cost policy.
    pub fn new(bus_capacity: u32) -> Self {
        Self {
            bus_capacity,
            policy: CostPolicy::default(),
        }
    }

    /// Replaces the cost policy.
    pub fn with_policy(mut self, policy: CostPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Seats per bus.
    pub fn bus_capacity(&self) -> u32 {
        self.bus_capacity
    }

    /// Active cost policy.
    pub fn policy(&self) -> &CostPolicy {
        &self.policy
    }

    /// Evaluates a route given as employee counts in visiting order.
    ///
    /// The counts are copied; the caller's data is never touched.
    pub fn evaluate_loads<I>(&self, loads: I) -> Evaluation
    where
        I: IntoIterator<Item = u32>,
    {
        let mut waiting: Vec<u32> = loads.into_iter().collect();
        let total: u64 = waiting.iter().map(|&w| u64::from(w)).sum();
        let mut remaining = total;
        let mut bus_count = 0u32;

        while remaining > 0 && bus_count < self.policy.max_passes {
            bus_count += 1;
            let mut free_seats = self.bus_capacity;

            for stop in waiting.iter_mut() {
                if *stop > 0 && free_seats > 0 {
                    let pickup = self.policy.boarding(*stop, free_seats);
                    *stop -= pickup;
                    free_seats -= pickup;
                    remaining -= u64::from(pickup);
                }
            }

            if free_seats == self.bus_capacity {
                break;
            }
        }

        let seats = u64::from(bus_count) * u64::from(self.bus_capacity);
        let empty_seats = seats.saturating_sub(total);
        Evaluation {
            cost: f64::from(bus_count) * self.policy.bus_weight
                + empty_seats as f64 * self.policy.empty_seat_weight,
            bus_count,
        }
    }

    /// Evaluates a route of company names.
    ///
    /// Names missing from `employees` count as companies with nobody waiting.
    pub fn evaluate<S: AsRef<str>>(
        &self,
        route: &[S],
        employees: &HashMap<String, u32>,
    ) -> Evaluation {
        self.evaluate_loads(
            route
                .iter()
                .map(|name| employees.get(name.as_ref()).copied().unwrap_or(0)),
        )
    }
}

/// Evaluates `route` with the default cost policy.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use u_shuttle::evaluation::evaluate;
///
/// let employees = HashMap::from([("A".to_string(), 10), ("B".to_string(), 15)]);
/// let result = evaluate(&["A", "B"], &employees, 22);
/// assert_eq!(result.bus_count, 2);
/// ```
pub fn evaluate<S: AsRef<str>>(
    route: &[S],
    employees: &HashMap<String, u32>,
    bus_capacity: u32,
) -> Evaluation {
    RouteEvaluator::new(bus_capacity).evaluate(route, employees)
}
