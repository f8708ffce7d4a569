//! SA configuration.

use crate::error::{Result, ShuttleError};

/// Configuration for the Simulated Annealing loop.
///
/// Cooling is geometric: `T_{k+1} = cooling_rate * T_k` after each
/// temperature level. Defaults describe the stop-ordering search: start at
/// 1000, cool by 2% after every move, stop after 1000 moves.
///
/// # Examples
///
/// ```
/// use u_shuttle::sa::SaConfig;
///
/// let config = SaConfig::default()
///     .with_initial_temperature(500.0)
///     .with_cooling_rate(0.95)
///     .with_max_iterations(2000)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SaConfig {
    /// Initial temperature.
    pub initial_temperature: f64,

    /// The loop stops once the temperature falls to this value.
    pub min_temperature: f64,

    /// Geometric cooling factor in (0, 1). Higher = slower cooling.
    pub cooling_rate: f64,

    /// Moves attempted at each temperature level.
    pub iterations_per_temperature: usize,

    /// Maximum total moves (hard budget). 0 = no limit.
    pub max_iterations: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 1000.0,
            min_temperature: 1e-12,
            cooling_rate: 0.98,
            iterations_per_temperature: 1,
            max_iterations: 1000,
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    pub fn with_iterations_per_temperature(mut self, n: usize) -> Self {
        self.iterations_per_temperature = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(self.initial_temperature > 0.0) {
            return Err(invalid("initial_temperature must be positive"));
        }
        if !(self.min_temperature > 0.0) {
            return Err(invalid("min_temperature must be positive"));
        }
        if self.min_temperature >= self.initial_temperature {
            return Err(invalid(
                "min_temperature must be less than initial_temperature",
            ));
        }
        if self.iterations_per_temperature == 0 {
            return Err(invalid("iterations_per_temperature must be positive"));
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(invalid(format!(
                "cooling_rate must be in (0, 1), got {}",
                self.cooling_rate
            )));
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> ShuttleError {
    ShuttleError::InvalidConfig(message.into())
}
