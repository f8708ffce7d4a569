//! Schedule generation parameters.

use chrono::NaiveTime;

use crate::error::{Result, ShuttleError};
use crate::evaluation::DEFAULT_PER_STOP_CAP;

/// Default bus speed in km/h.
pub const DEFAULT_BUS_SPEED_KMH: f64 = 30.0;

/// Most trips a single schedule will emit.
pub const MAX_TRIPS: u32 = 1_000;

/// Timing and boarding parameters for the schedule generator.
///
/// # Examples
///
/// ```
/// use u_shuttle::schedule::ScheduleConfig;
///
/// let config = ScheduleConfig::default().with_bus_speed(45.0);
/// assert_eq!(config.dwell_minutes, 5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleConfig {
    /// Departure time of the first trip.
    pub first_departure: NaiveTime,

    /// Minutes between consecutive trip departures.
    pub dispatch_interval_minutes: i64,

    /// Average bus speed (km/h).
    pub bus_speed_kmh: f64,

    /// Minutes spent boarding at each stop.
    pub dwell_minutes: i64,

    /// Minutes from arrival until work starts.
    pub work_start_offset_minutes: i64,

    /// Length of the working day in hours.
    pub work_duration_hours: i64,

    /// Maximum employees boarding at one stop.
    pub per_stop_cap: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            first_departure: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default(),
            dispatch_interval_minutes: 8,
            bus_speed_kmh: DEFAULT_BUS_SPEED_KMH,
            dwell_minutes: 5,
            work_start_offset_minutes: 15,
            work_duration_hours: 6,
            per_stop_cap: DEFAULT_PER_STOP_CAP,
        }
    }
}

impl ScheduleConfig {
    pub fn with_first_departure(mut self, time: NaiveTime) -> Self {
        self.first_departure = time;
        self
    }

    pub fn with_dispatch_interval(mut self, minutes: i64) -> Self {
        self.dispatch_interval_minutes = minutes;
        self
    }

    pub fn with_bus_speed(mut self, kmh: f64) -> Self {
        self.bus_speed_kmh = kmh;
        self
    }

    pub fn with_dwell(mut self, minutes: i64) -> Self {
        self.dwell_minutes = minutes;
        self
    }

    pub fn with_work_start_offset(mut self, minutes: i64) -> Self {
        self.work_start_offset_minutes = minutes;
        self
    }

    pub fn with_work_duration(mut self, hours: i64) -> Self {
        self.work_duration_hours = hours;
        self
    }

    pub fn with_per_stop_cap(mut self, cap: u32) -> Self {
        self.per_stop_cap = cap;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.bus_speed_kmh.is_finite() || self.bus_speed_kmh <= 0.0 {
            return Err(ShuttleError::InvalidSpeed(self.bus_speed_kmh));
        }
        if self.per_stop_cap == 0 {
            return Err(ShuttleError::InvalidPolicy(
                "per-stop cap must be positive".into(),
            ));
        }
        Ok(())
    }
}
