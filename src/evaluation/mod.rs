//! Route cost evaluation.
//!
//! Scores a visiting order by simulating how many bus passes are needed to
//! clear every stop, then weighting the fleet size far above the number of
//! empty seats. The evaluator is pure: identical inputs always produce
//! identical results, and caller-owned counts are never modified.

mod evaluator;
mod policy;

pub use evaluator::{evaluate, Evaluation, RouteEvaluator};
pub use policy::{
    CostPolicy, DEFAULT_BUS_WEIGHT, DEFAULT_EMPTY_SEAT_WEIGHT, DEFAULT_MAX_PASSES,
    DEFAULT_PER_STOP_CAP,
};
