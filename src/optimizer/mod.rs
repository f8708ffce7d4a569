//! Stop-order optimization.
//!
//! Wraps the route evaluator in an [`SaProblem`](crate::sa::SaProblem)
//! whose solutions are permutations of the stops and whose only move is a
//! random swap of two positions. The search is a heuristic: the returned
//! order is never worse than the starting order, but it is not guaranteed
//! to be optimal.

mod problem;
mod runner;

pub use problem::RouteProblem;
pub use runner::{optimize, RouteOptimizer, RouteOptimum};
