//! End-to-end planning: request in, optimized route and trip schedule out.
//!
//! A [`PlanRequest`] is what a data-entry surface (CLI, config file, API)
//! produces. [`Planner`] validates it, optimizes the stop order, generates
//! the schedule, and returns a [`PlanReport`]. [`Planner::spawn`] runs the
//! same pipeline on a worker thread and streams progress over a channel.

use std::fmt;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, ShuttleError};
use crate::evaluation::CostPolicy;
use crate::optimizer::RouteOptimizer;
use crate::registry::{Company, CompanyRegistry};
use crate::sa::{SaConfig, SaProgress};
use crate::schedule::{
    parse_time, Schedule, ScheduleConfig, ScheduleGenerator, DEFAULT_BUS_SPEED_KMH, MAX_TRIPS,
};

/// One company as entered by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyInput {
    pub name: String,
    pub employees: u32,
    pub distance_km: f64,
}

/// Everything needed for one planning run.
///
/// # Examples
///
/// ```
/// use u_shuttle::plan::PlanRequest;
///
/// let request: PlanRequest = serde_json::from_str(r#"{
///     "bus_capacity": 22,
///     "max_trips": 5,
///     "companies": [
///         { "name": "A", "employees": 10, "distance_km": 5.0 },
///         { "name": "B", "employees": 15, "distance_km": 10.0 }
///     ]
/// }"#).unwrap();
///
/// assert_eq!(request.bus_speed_kmh, 30.0);
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Seats per bus.
    pub bus_capacity: u32,

    /// Number of trips to schedule.
    pub max_trips: u32,

    /// Companies in initial route order.
    pub companies: Vec<CompanyInput>,

    /// Fixed seed for a reproducible search.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Bus speed in km/h.
    #[serde(default = "default_bus_speed")]
    pub bus_speed_kmh: f64,

    /// First departure as `HH:MM`; unparseable values fall back to the default.
    #[serde(default)]
    pub first_departure: Option<String>,

    /// Cost weights and boarding limits; the planner's policy when absent.
    #[serde(default)]
    pub policy: Option<CostPolicy>,
}

fn default_bus_speed() -> f64 {
    DEFAULT_BUS_SPEED_KMH
}

impl PlanRequest {
    /// Checks the scalar settings and the company list.
    pub fn validate(&self) -> Result<()> {
        if self.bus_capacity == 0 {
            return Err(ShuttleError::ZeroCapacity);
        }
        if self.max_trips == 0 {
            return Err(ShuttleError::ZeroTrips);
        }
        if self.max_trips > MAX_TRIPS {
            return Err(ShuttleError::TooManyTrips {
                requested: self.max_trips,
                max: MAX_TRIPS,
            });
        }
        if !self.bus_speed_kmh.is_finite() || self.bus_speed_kmh <= 0.0 {
            return Err(ShuttleError::InvalidSpeed(self.bus_speed_kmh));
        }
        if let Some(policy) = &self.policy {
            policy.validate()?;
        }
        self.registry().map(|_| ())
    }

    /// Builds the company registry in the order given.
    pub fn registry(&self) -> Result<CompanyRegistry> {
        CompanyRegistry::from_companies(
            self.companies
                .iter()
                .map(|c| Company::new(c.name.as_str(), c.employees, c.distance_km)),
        )
    }
}

/// Result of a planning run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanReport {
    pub initial_route: Vec<String>,
    pub optimized_route: Vec<String>,
    pub initial_bus_count: u32,
    pub bus_count: u32,
    pub buses_saved: i64,
    pub initial_cost: f64,
    pub best_cost: f64,
    pub iterations: usize,
    pub cancelled: bool,
    pub trips: Schedule,
}

/// Advisory progress update.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    /// Zero-based move index.
    pub iteration: usize,

    /// Completed share of the move budget in `[0, 1]`; `None` when unlimited.
    pub fraction: Option<f64>,

    /// Status line such as `Iteration 250/1000`.
    pub status: String,
}

impl From<&SaProgress> for Progress {
    fn from(p: &SaProgress) -> Self {
        Self {
            iteration: p.iteration,
            fraction: p.fraction(),
            status: p.status(),
        }
    }
}

/// Runs the optimization and scheduling pipeline.
#[derive(Debug, Clone, Default)]
pub struct Planner {
    policy: CostPolicy,
    annealing: SaConfig,
    schedule: ScheduleConfig,
}

impl Planner {
    /// Creates a planner after validating every configuration part.
    pub fn new(policy: CostPolicy, annealing: SaConfig, schedule: ScheduleConfig) -> Result<Self> {
        policy.validate()?;
        annealing.validate()?;
        schedule.validate()?;
        Ok(Self {
            policy,
            annealing,
            schedule,
        })
    }

    /// Plans without progress reporting.
    pub fn plan(&self, request: &PlanRequest) -> Result<PlanReport> {
        self.plan_with_progress(request, |_| ControlFlow::Continue(()))
    }

    /// Plans, calling `on_progress` before every search move.
    ///
    /// Breaking from the callback ends the search early; the schedule is
    /// still built from the best order found so far.
    pub fn plan_with_progress<F>(
        &self,
        request: &PlanRequest,
        mut on_progress: F,
    ) -> Result<PlanReport>
    where
        F: FnMut(Progress) -> ControlFlow<()>,
    {
        request.validate()?;
        let registry = request.registry()?;

        let mut annealing = self.annealing.clone();
        if let Some(seed) = request.seed {
            annealing.seed = Some(seed);
        }
        let policy = request.policy.unwrap_or(self.policy);
        let optimizer = RouteOptimizer::new(policy, annealing)?;

        let mut schedule_config = self
            .schedule
            .clone()
            .with_bus_speed(request.bus_speed_kmh)
            .with_per_stop_cap(policy.per_stop_cap);
        if let Some(raw) = request.first_departure.as_deref() {
            match parse_time(raw) {
                Some(time) => schedule_config = schedule_config.with_first_departure(time),
                None => {
                    warn!(first_departure = raw, "unparseable departure time, using default")
                }
            }
        }
        let generator = ScheduleGenerator::new(schedule_config)?;

        info!(
            companies = registry.len(),
            employees = registry.total_employees(),
            bus_capacity = request.bus_capacity,
            "planning started"
        );

        let optimum = optimizer.optimize_registry(&registry, request.bus_capacity, |p| {
            on_progress(Progress::from(p))
        });

        let trips = generator.generate(
            &optimum.route,
            &registry.employee_counts(),
            &registry.distances(),
            request.bus_capacity,
            request.max_trips,
        );

        Ok(PlanReport {
            initial_route: registry.order().to_vec(),
            buses_saved: optimum.buses_saved(),
            optimized_route: optimum.route,
            initial_bus_count: optimum.initial.bus_count,
            bus_count: optimum.bus_count,
            initial_cost: optimum.initial.cost,
            best_cost: optimum.cost,
            iterations: optimum.iterations,
            cancelled: optimum.cancelled,
            trips,
        })
    }

    /// Plans on a worker thread.
    ///
    /// Progress arrives on [`PlanHandle::progress`]; a dropped receiver is
    /// ignored. [`PlanHandle::cancel`] stops the search at the next move.
    pub fn spawn(self, request: PlanRequest) -> PlanHandle {
        let (tx, rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancel);

        let worker = thread::spawn(move || {
            self.plan_with_progress(&request, |progress| {
                // A disconnected receiver only means nobody is watching.
                let _ = tx.send(progress);
                if flag.load(Ordering::Relaxed) {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            })
        });

        PlanHandle {
            progress: rx,
            cancel,
            worker,
        }
    }
}

/// Handle to a planning run on a worker thread.
pub struct PlanHandle {
    progress: Receiver<Progress>,
    cancel: Arc<AtomicBool>,
    worker: JoinHandle<Result<PlanReport>>,
}

impl PlanHandle {
    /// Progress updates; the channel closes when the run finishes.
    pub fn progress(&self) -> &Receiver<Progress> {
        &self.progress
    }

    /// Asks the search to stop at the next move.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// Waits for the run to finish.
    pub fn join(self) -> Result<PlanReport> {
        self.worker
            .join()
            .map_err(|_| ShuttleError::WorkerPanicked)?
    }
}

impl fmt::Display for PlanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "OPTIMIZATION COMPLETE")?;
        writeln!(f)?;
        writeln!(f, "RESULTS SUMMARY")?;
        writeln!(f, "- Initial Route: {}", self.initial_route.join(" → "))?;
        writeln!(f, "- Optimized Route: {}", self.optimized_route.join(" → "))?;
        writeln!(
            f,
            "- Buses Used: {} → {} ({} saved)",
            self.initial_bus_count, self.bus_count, self.buses_saved
        )?;
        if self.cancelled {
            writeln!(f, "- Search stopped early after {} iterations", self.iterations)?;
        }
        write!(f, "{}", self.trips)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PlanRequest {
        PlanRequest {
            bus_capacity: 24,
            max_trips: 3,
            companies: vec![
                CompanyInput {
                    name: "B".into(),
                    employees: 10,
                    distance_km: 4.0,
                },
                CompanyInput {
                    name: "C".into(),
                    employees: 14,
                    distance_km: 8.0,
                },
                CompanyInput {
                    name: "A".into(),
                    employees: 24,
                    distance_km: 2.0,
                },
            ],
            seed: Some(42),
            bus_speed_kmh: 30.0,
            first_departure: None,
            policy: None,
        }
    }

    #[test]
    fn test_plan_end_to_end() {
        let report = Planner::default().plan(&request()).expect("valid request");

        assert_eq!(report.initial_route, vec!["B", "C", "A"]);
        assert_eq!(report.initial_bus_count, 3);
        assert_eq!(report.bus_count, 2);
        assert_eq!(report.buses_saved, 1);
        assert!(report.best_cost <= report.initial_cost);
        assert_eq!(report.trips.len(), 3);
        assert_eq!(report.trips.total_boarded(), 48);
    }

    #[test]
    fn test_plan_is_reproducible_with_seed() {
        let a = Planner::default().plan(&request()).expect("valid request");
        let b = Planner::default().plan(&request()).expect("valid request");
        assert_eq!(a, b);
    }

    #[test]
    fn test_validation_errors() {
        let mut req = request();
        req.bus_capacity = 0;
        assert_eq!(req.validate(), Err(ShuttleError::ZeroCapacity));

        let mut req = request();
        req.max_trips = 0;
        assert_eq!(req.validate(), Err(ShuttleError::ZeroTrips));

        let mut req = request();
        req.bus_speed_kmh = 0.0;
        assert!(matches!(req.validate(), Err(ShuttleError::InvalidSpeed(_))));

        let mut req = request();
        req.companies[1].name = "B".into();
        assert_eq!(
            Planner::default().plan(&req).unwrap_err(),
            ShuttleError::DuplicateCompany("B".into())
        );
    }

    #[test]
    fn test_empty_company_list_is_trivial() {
        let mut req = request();
        req.companies.clear();
        let report = Planner::default().plan(&req).expect("valid request");
        assert!(report.optimized_route.is_empty());
        assert_eq!(report.bus_count, 0);
        assert_eq!(report.best_cost, 0.0);
        assert_eq!(report.trips.len(), 3);
        assert_eq!(report.trips.total_boarded(), 0);
    }

    #[test]
    fn test_first_departure_override() {
        let mut req = request();
        req.first_departure = Some("06:45".into());
        let report = Planner::default().plan(&req).expect("valid request");
        assert_eq!(
            crate::schedule::format_time(report.trips.trips()[0].departure),
            "06:45"
        );

        req.first_departure = Some("quarter past".into());
        let report = Planner::default().plan(&req).expect("valid request");
        assert_eq!(
            crate::schedule::format_time(report.trips.trips()[0].departure),
            "08:00"
        );
    }

    #[test]
    fn test_progress_stream_and_cancel() {
        let mut updates = Vec::new();
        let report = Planner::default()
            .plan_with_progress(&request(), |p| {
                updates.push(p);
                if updates.len() == 5 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            })
            .expect("valid request");

        assert!(report.cancelled);
        assert_eq!(report.iterations, 4);
        assert_eq!(updates[0].status, "Iteration 0/1000");
        assert_eq!(updates[0].fraction, Some(0.0));
        assert_eq!(updates[4].iteration, 4);
        assert_eq!(updates[4].fraction, Some(0.004));
    }

    #[test]
    fn test_spawn_streams_progress() {
        let handle = Planner::default().spawn(request());
        let updates: Vec<Progress> = handle.progress().iter().collect();
        let report = handle.join().expect("worker finished");

        assert_eq!(updates.len(), 1000);
        assert_eq!(updates.last().map(|p| p.iteration), Some(999));
        assert_eq!(report.bus_count, 2);
    }

    #[test]
    fn test_spawn_cancel_stops_the_search() {
        // Cooling this slowly would take billions of moves to reach the floor.
        let annealing = SaConfig::default()
            .with_max_iterations(0)
            .with_cooling_rate(0.999_999_9)
            .with_min_temperature(1e-300);
        let planner = Planner::new(CostPolicy::default(), annealing, ScheduleConfig::default())
            .expect("valid config");

        let handle = planner.spawn(request());
        let first = handle.progress().recv().expect("search started");
        assert_eq!(first.iteration, 0);
        assert_eq!(first.fraction, None);
        handle.cancel();

        let report = handle.join().expect("worker finished");
        assert!(report.cancelled);
        assert!(report.iterations >= 1);
        assert!(report.iterations < 1_000_000_000);
        assert_eq!(report.trips.len(), 3);
    }

    #[test]
    fn test_report_display() {
        let report = Planner::default().plan(&request()).expect("valid request");
        let text = report.to_string();
        assert!(text.contains("- Initial Route: B → C → A"));
        assert!(text.contains("- Buses Used: 3 → 2 (1 saved)"));
        assert!(text.contains("TRIP #3 - MORNING ARRIVAL"));
    }

    #[test]
    fn test_trip_count_limit() {
        let mut req = request();
        req.max_trips = MAX_TRIPS;
        assert!(req.validate().is_ok());

        req.max_trips = MAX_TRIPS + 1;
        assert_eq!(
            req.validate(),
            Err(ShuttleError::TooManyTrips {
                requested: MAX_TRIPS + 1,
                max: MAX_TRIPS,
            })
        );
        assert!(Planner::default().plan(&req).is_err());
    }

    #[test]
    fn test_request_policy_overrides_planner() {
        let mut req = request();
        req.policy = Some(CostPolicy::default().with_per_stop_cap(24));
        let report = Planner::default().plan(&req).expect("valid request");

        // B and C fill the first bus together once a stop may board 24.
        assert_eq!(report.initial_bus_count, 2);
        let first = &report.trips.trips()[0];
        assert_eq!(first.pickups[0].count, 10);
        assert_eq!(first.pickups[1].count, 14);

        req.policy = Some(CostPolicy::default().with_per_stop_cap(0));
        assert!(matches!(
            req.validate(),
            Err(ShuttleError::InvalidPolicy(_))
        ));
    }

    #[test]
    fn test_request_json_defaults() {
        let req: PlanRequest = serde_json::from_str(
            r#"{"bus_capacity": 10, "max_trips": 1, "companies": []}"#,
        )
        .expect("valid json");
        assert_eq!(req.seed, None);
        assert_eq!(req.bus_speed_kmh, 30.0);
        assert_eq!(req.first_departure, None);
        assert_eq!(req.policy, None);
    }
}
