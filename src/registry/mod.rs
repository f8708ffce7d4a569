//! Company registry.
//!
//! Holds the pickup points of a planning run: each company's employee
//! count and distance from the depot, and the order in which the caller
//! listed them (the initial route).

mod company;

pub use company::{Company, CompanyRegistry};
