//! Error type for input and configuration validation.
//!
//! Only boundary checks (registry construction, request parsing, config
//! validation) produce errors. The evaluator, annealing loop, and schedule
//! generator are infallible once their inputs have been accepted.

use thiserror::Error;

/// Errors raised while validating shuttle planning inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShuttleError {
    #[error("company name must not be empty")]
    EmptyCompanyName,

    #[error("company `{0}` is registered more than once")]
    DuplicateCompany(String),

    #[error("company `{name}` has invalid distance {distance} km")]
    InvalidDistance { name: String, distance: f64 },

    #[error("bus capacity must be positive")]
    ZeroCapacity,

    #[error("trip count must be positive")]
    ZeroTrips,

    #[error("trip count {requested} exceeds the limit of {max}")]
    TooManyTrips { requested: u32, max: u32 },

    #[error("bus speed must be a positive finite number, got {0} km/h")]
    InvalidSpeed(f64),

    #[error("invalid cost policy: {0}")]
    InvalidPolicy(String),

    #[error("invalid annealing configuration: {0}")]
    InvalidConfig(String),

    #[error("planning worker terminated unexpectedly")]
    WorkerPanicked,
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, ShuttleError>;
