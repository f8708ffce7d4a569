//! Trip schedule generation.
//!
//! Projects an optimized visiting order onto the clock: staggered
//! departures from the depot, travel at a fixed speed, a fixed dwell at
//! each stop, and per-group work start and end times. Times are plain
//! `HH:MM` wall-clock values that wrap through midnight.

mod clock;
mod config;
mod generator;

pub use clock::{
    add_hours, add_minutes, format_time, parse_time, shift_hours, shift_minutes, TIME_FORMAT,
};
pub use config::{ScheduleConfig, DEFAULT_BUS_SPEED_KMH, MAX_TRIPS};
pub use generator::{generate, Pickup, Schedule, ScheduleGenerator, Trip};
