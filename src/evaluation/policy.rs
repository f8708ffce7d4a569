//! Cost weights and loading limits.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShuttleError};

/// Cost added per dispatched bus.
pub const DEFAULT_BUS_WEIGHT: f64 = 1000.0;

/// Cost added per empty seat across all dispatched buses.
pub const DEFAULT_EMPTY_SEAT_WEIGHT: f64 = 10.0;

/// Maximum number of employees boarding at a single stop.
pub const DEFAULT_PER_STOP_CAP: u32 = 12;

/// Hard limit on simulated bus passes per evaluation.
pub const DEFAULT_MAX_PASSES: u32 = 20;

/// Business policy encoded in the cost function.
///
/// The default weights make fleet size dominate: one extra bus always
/// outweighs any realistic number of empty seats.
///
/// # Examples
///
/// ```
/// use u_shuttle::evaluation::CostPolicy;
///
/// let policy = CostPolicy::default().with_per_stop_cap(8);
/// assert_eq!(policy.per_stop_cap, 8);
/// assert_eq!(policy.max_passes, 20);
/// assert!(policy.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostPolicy {
    /// Weight per bus.
    pub bus_weight: f64,

    /// Weight per empty seat.
    pub empty_seat_weight: f64,

    /// Boarding limit per stop, independent of bus capacity.
    pub per_stop_cap: u32,

    /// Safety cap on passes over the route.
    pub max_passes: u32,
}

impl Default for CostPolicy {
    fn default() -> Self {
        Self {
            bus_weight: DEFAULT_BUS_WEIGHT,
            empty_seat_weight: DEFAULT_EMPTY_SEAT_WEIGHT,
            per_stop_cap: DEFAULT_PER_STOP_CAP,
            max_passes: DEFAULT_MAX_PASSES,
        }
    }
}

impl CostPolicy {
    pub fn with_bus_weight(mut self, weight: f64) -> Self {
        self.bus_weight = weight;
        self
    }

    pub fn with_empty_seat_weight(mut self, weight: f64) -> Self {
        self.empty_seat_weight = weight;
        self
    }

    pub fn with_per_stop_cap(mut self, cap: u32) -> Self {
        self.per_stop_cap = cap;
        self
    }

    pub fn with_max_passes(mut self, passes: u32) -> Self {
        self.max_passes = passes;
        self
    }

    /// Number of employees boarding at one stop.
    pub fn boarding(&self, waiting: u32, free_seats: u32) -> u32 {
        waiting.min(free_seats).min(self.per_stop_cap)
    }

    /// Validates the policy.
    pub fn validate(&self) -> Result<()> {
        if !self.bus_weight.is_finite() || self.bus_weight < 0.0 {
            return Err(ShuttleError::InvalidPolicy(format!(
                "bus weight must be non-negative, got {}",
                self.bus_weight
            )));
        }
        if !self.empty_seat_weight.is_finite() || self.empty_seat_weight < 0.0 {
            return Err(ShuttleError::InvalidPolicy(format!(
                "empty seat weight must be non-negative, got {}",
                self.empty_seat_weight
            )));
        }
        if self.per_stop_cap == 0 {
            return Err(ShuttleError::InvalidPolicy(
                "per-stop cap must be positive".into(),
            ));
        }
        if self.max_passes == 0 {
            return Err(ShuttleError::InvalidPolicy(
                "max passes must be positive".into(),
            ));
        }
        Ok(())
    }
}
