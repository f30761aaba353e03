//! Train departure clock.
//!
//! Looks up the next two departures of one line between two stations on an
//! itinerary site, and shows them in turn on a 4-digit display during
//! configured hours.

pub mod clock;
pub mod config;
pub mod display;
pub mod domain;
pub mod jorudan;
pub mod runner;
pub mod scan;
pub mod schedule;
