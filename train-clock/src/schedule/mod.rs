//! Departure lookups and the operating window.
//!
//! [`ScheduleFinder`] turns "the next two trains after T" into two site
//! searches; [`OperatingWindow`] says whether it is worth asking at all.

mod finder;
mod window;

#[cfg(test)]
mod finder_tests;

pub use finder::{DeparturePair, ScheduleFetcher, ScheduleFinder};
pub use window::{DayType, OperatingWindow, TimeRange, WeeklyWindowTable, WindowError, WindowLookup};
