//! Trip schedule generation.

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveTime;
use serde::Serialize;
use tracing::{debug, warn};

use super::clock::{format_time, hhmm, shift_hours, shift_minutes};
use super::config::{ScheduleConfig, MAX_TRIPS};
use crate::error::Result;

/// Employees picked up at one stop during one trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pickup {
    /// Company name.
    pub company: String,

    /// Employees boarded.
    pub count: u32,

    /// Bus arrival at the stop.
    #[serde(with = "hhmm")]
    pub arrival: NaiveTime,

    /// When this group starts work.
    #[serde(with = "hhmm")]
    pub work_start: NaiveTime,

    /// When this group finishes work.
    #[serde(with = "hhmm")]
    pub work_end: NaiveTime,
}

/// One dispatched bus: its departure, stops, and arrival at the destination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trip {
    /// 1-based trip number.
    pub trip_number: u32,

    /// Departure from the depot.
    #[serde(with = "hhmm")]
    pub departure: NaiveTime,

    /// Arrival at the destination (after the last dwell).
    #[serde(with = "hhmm")]
    pub arrival: NaiveTime,

    /// Employees aboard.
    pub boarded: u32,

    /// Seats on the bus.
    pub capacity: u32,

    /// Stops in visiting order.
    pub pickups: Vec<Pickup>,
}

/// Ordered trips, one per requested slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Schedule {
    trips: Vec<Trip>,
}

impl Schedule {
    /// Trips in dispatch order.
    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    /// Number of trips.
    pub fn len(&self) -> usize {
        self.trips.len()
    }

    /// Returns `true` if no trips were requested.
    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// Employees carried across all trips.
    pub fn total_boarded(&self) -> u64 {
        self.trips.iter().map(|t| u64::from(t.boarded)).sum()
    }

    /// Employees of `company` carried across all trips.
    pub fn picked_up(&self, company: &str) -> u64 {
        self.trips
            .iter()
            .flat_map(|t| &t.pickups)
            .filter(|p| p.company == company)
            .map(|p| u64::from(p.count))
            .sum()
    }

    /// Consumes the schedule, returning its trips.
    pub fn into_trips(self) -> Vec<Trip> {
        self.trips
    }
}

/// Turns a fixed visiting order into timed trips.
///
/// Waiting employees carry over from one trip to the next: each trip walks
/// the route from the depot, boarding at every stop that still has people
/// waiting until the bus is full.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use u_shuttle::schedule::{ScheduleConfig, ScheduleGenerator};
///
/// let generator = ScheduleGenerator::new(ScheduleConfig::default()).unwrap();
/// let employees = HashMap::from([("A".to_string(), 10)]);
/// let distances = HashMap::from([("A".to_string(), 5.0)]);
///
/// let schedule = generator.generate(&["A"], &employees, &distances, 22, 2);
/// assert_eq!(schedule.len(), 2);
/// assert_eq!(schedule.trips()[0].boarded, 10);
/// assert_eq!(schedule.trips()[1].boarded, 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScheduleGenerator {
    config: ScheduleConfig,
}

impl ScheduleGenerator {
    /// Creates a generator after validating `config`.
    pub fn new(config: ScheduleConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration.
    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Generates `trip_count` trips over `route`.
    ///
    /// Companies missing from `employees` have nobody waiting; companies
    /// missing from `distances` sit at the depot. Counts above
    /// [`MAX_TRIPS`] are clamped.
    pub fn generate<S: AsRef<str>>(
        &self,
        route: &[S],
        employees: &HashMap<String, u32>,
        distances: &HashMap<String, f64>,
        bus_capacity: u32,
        trip_count: u32,
    ) -> Schedule {
        let config = &self.config;
        let mut waiting: HashMap<&str, u32> = route
            .iter()
            .map(|name| {
                let name = name.as_ref();
                (name, employees.get(name).copied().unwrap_or(0))
            })
            .collect();

        if trip_count > MAX_TRIPS {
            warn!(requested = trip_count, max = MAX_TRIPS, "trip count clamped");
        }
        let trip_count = trip_count.min(MAX_TRIPS);
        let mut trips = Vec::with_capacity(trip_count as usize);

        for trip_number in 1..=trip_count {
            let departure = shift_minutes(
                config.first_departure,
                config.dispatch_interval_minutes * i64::from(trip_number - 1),
            );
            let mut clock = departure;
            let mut position_km = 0.0;
            let mut free_seats = bus_capacity;
            let mut pickups = Vec::new();

            for name in route {
                let name = name.as_ref();
                let Some(left) = waiting.get_mut(name) else {
                    continue;
                };
                if *left == 0 || free_seats == 0 {
                    continue;
                }

                let distance_km = distances.get(name).copied().unwrap_or(0.0);
                let travel_minutes =
                    ((distance_km - position_km) * 60.0 / config.bus_speed_kmh) as i64;
                let arrival = shift_minutes(clock, travel_minutes);

                let count = (*left).min(free_seats).min(config.per_stop_cap);
                *left -= count;
                free_seats -= count;

                let work_start = shift_minutes(arrival, config.work_start_offset_minutes);
                pickups.push(Pickup {
                    company: name.to_string(),
                    count,
                    arrival,
                    work_start,
                    work_end: shift_hours(work_start, config.work_duration_hours),
                });

                clock = shift_minutes(arrival, config.dwell_minutes);
                position_km = distance_km;
            }

            let trip = Trip {
                trip_number,
                departure,
                arrival: clock,
                boarded: bus_capacity - free_seats,
                capacity: bus_capacity,
                pickups,
            };
            debug!(
                trip = trip.trip_number,
                boarded = trip.boarded,
                stops = trip.pickups.len(),
                "trip scheduled"
            );
            trips.push(trip);
        }

        Schedule { trips }
    }
}

/// Generates a schedule with default timings and the given bus speed.
///
/// `bus_speed` must be positive; use [`ScheduleGenerator::new`] to have it
/// checked.
pub fn generate<S: AsRef<str>>(
    route: &[S],
    employees: &HashMap<String, u32>,
    bus_capacity: u32,
    distances: &HashMap<String, f64>,
    bus_speed: f64,
    trip_count: u32,
) -> Schedule {
    let generator = ScheduleGenerator {
        config: ScheduleConfig::default().with_bus_speed(bus_speed),
    };
    generator.generate(route, employees, distances, bus_capacity, trip_count)
}

impl fmt::Display for Trip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "TRIP #{} - MORNING ARRIVAL", self.trip_number)?;
        writeln!(
            f,
            "  {} → {} | {}/{}",
            format_time(self.departure),
            format_time(self.arrival),
            self.boarded,
            self.capacity
        )?;
        let chain: Vec<String> = self
            .pickups
            .iter()
            .map(|p| format!("{}({})", p.company, p.count))
            .collect();
        writeln!(f, "  {}", chain.join(" → "))?;
        writeln!(f)?;
        writeln!(f, "  Station     Pickup  Arrival  WorkStart  WorkEnd")?;
        writeln!(f, "  {}", "─".repeat(50))?;
        for p in &self.pickups {
            writeln!(
                f,
                "  {:<10} {:<7} {:<9} {:<10} {}",
                p.company,
                p.count,
                format_time(p.arrival),
                format_time(p.work_start),
                format_time(p.work_end)
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for trip in &self.trips {
            writeln!(f)?;
            write!(f, "{trip}")?;
        }
        Ok(())
    }
}
