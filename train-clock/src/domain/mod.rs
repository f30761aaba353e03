//! Domain types for the train clock.
//!
//! These types enforce their invariants at construction time, so the
//! scanner, the schedule finder and the loops can pass them around freely.

mod code;
mod query;
mod time;

pub use code::{DisplayCode, InvalidCode};
pub use query::ScheduleQuery;
pub use time::{TimeError, hhmm, parse_twelve_hour, resolve_departure, truncate_to_minute};
