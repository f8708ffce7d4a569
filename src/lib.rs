//! Employee shuttle planning.
//!
//! Decides the order in which a bus visits employee pickup points
//! ("companies"), how many buses that order needs, and when each trip
//! departs, stops, and arrives:
//!
//! - **Registry** ([`registry`]): companies with employee counts and
//!   distances from the depot, in the caller's initial order.
//! - **Evaluation** ([`evaluation`]): greedy multi-bus loading simulation
//!   scoring any visiting order by fleet size, then empty seats.
//! - **Simulated Annealing** ([`sa`]): generic single-solution trajectory
//!   search with geometric cooling, progress callbacks and cooperative
//!   cancellation.
//! - **Optimizer** ([`optimizer`]): the stop-ordering problem solved with SA
//!   using random transpositions as the only move.
//! - **Schedule** ([`schedule`]): deterministic projection of an order onto
//!   timed trips with work start and end times.
//! - **Plan** ([`plan`]): request/report boundary that wires it all together.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use u_shuttle::{evaluation, optimizer, schedule};
//!
//! let employees = HashMap::from([
//!     ("A".to_string(), 10),
//!     ("B".to_string(), 15),
//!     ("C".to_string(), 8),
//! ]);
//! let distances = HashMap::from([
//!     ("A".to_string(), 5.0),
//!     ("B".to_string(), 10.0),
//!     ("C".to_string(), 20.0),
//! ]);
//!
//! let initial = evaluation::evaluate(&["A", "B", "C"], &employees, 22);
//! assert_eq!(initial.bus_count, 2);
//!
//! let best = optimizer::optimize(&["A", "B", "C"], &employees, 22);
//! assert!(best.cost <= initial.cost);
//!
//! let trips = schedule::generate(&best.route, &employees, 22, &distances, 30.0, 3);
//! assert_eq!(trips.total_boarded(), 33);
//! ```

pub mod error;
pub mod evaluation;
pub mod optimizer;
pub mod plan;
pub mod registry;
pub mod sa;
pub mod schedule;

pub use error::{Result, ShuttleError};
