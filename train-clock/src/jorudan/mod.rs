//! Jorudan route search access.
//!
//! The site has no API: a search is a form POST and the answer is an HTML
//! results page meant for people. This module only moves pages; reading
//! departures out of them is the job of [`crate::scan`].

mod client;
mod error;
mod mock;

pub use client::{DEFAULT_BASE_URL, JorudanClient, JorudanConfig};
pub use error::FetchError;
pub use mock::MockFetcher;
