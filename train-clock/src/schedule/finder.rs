//! Next-departure lookups.
//!
//! A results page describes one journey starting at or after the searched
//! time, so each departure costs one request. The second departure is found
//! by searching again one minute after the first: the site includes trains
//! leaving in the searched minute, so searching at the first departure itself
//! would return the same train.

use chrono::{Duration, NaiveDateTime};
use regex::Regex;
use tracing::{debug, warn};

use crate::domain::{ScheduleQuery, resolve_departure};
use crate::jorudan::FetchError;
use crate::scan::{PageSignature, extract_departure};

/// Source of itinerary results pages.
///
/// This abstraction allows the finder to be tested with canned pages.
pub trait ScheduleFetcher: Send + Sync {
    /// Run one search and return the results page as text.
    fn fetch(
        &self,
        query: &ScheduleQuery,
    ) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// The next two departures, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeparturePair {
    pub first: NaiveDateTime,
    pub second: NaiveDateTime,
}

/// Finds departures of one line between two stations.
pub struct ScheduleFinder<F: ScheduleFetcher> {
    fetcher: F,
    signature: PageSignature,
    origin: String,
    destination: String,
    line_filter: Regex,
}

impl<F: ScheduleFetcher> ScheduleFinder<F> {
    /// Create a new finder.
    pub fn new(
        fetcher: F,
        signature: PageSignature,
        origin: impl Into<String>,
        destination: impl Into<String>,
        line_filter: Regex,
    ) -> Self {
        Self {
            fetcher,
            signature,
            origin: origin.into(),
            destination: destination.into(),
            line_filter,
        }
    }

    /// Query for departures at or after `at`.
    pub fn query(&self, at: NaiveDateTime) -> ScheduleQuery {
        ScheduleQuery::new(
            self.origin.clone(),
            self.destination.clone(),
            at,
            self.line_filter.clone(),
        )
    }

    /// Fetch one results page and read the departure from it.
    ///
    /// `Ok(None)` means the page was fetched but no matching train was on it.
    pub async fn find_next_departure(
        &self,
        query: &ScheduleQuery,
    ) -> Result<Option<NaiveDateTime>, FetchError> {
        let html = self.fetcher.fetch(query).await?;

        let found = extract_departure(
            &html,
            &self.signature,
            &query.origin,
            &query.destination,
            &query.line_filter,
        );

        match found.departure {
            Some(time) => {
                let departure = resolve_departure(query.at, time);
                debug!(at = %query.at, line = %found.line, %departure, "departure found");
                Ok(Some(departure))
            }
            None => {
                warn!(
                    at = %query.at,
                    line = %found.line,
                    "no departure on results page; station or line name may be wrong, or the page layout changed"
                );
                Ok(None)
            }
        }
    }

    /// Find the first departure at or after `origin_time` and the one after it.
    ///
    /// Returns `Ok(None)` unless both are found; a pair is never half-filled.
    pub async fn find_next_two_departures(
        &self,
        origin_time: NaiveDateTime,
    ) -> Result<Option<DeparturePair>, FetchError> {
        let Some(first) = self.find_next_departure(&self.query(origin_time)).await? else {
            return Ok(None);
        };

        let after_first = self.query(first + Duration::minutes(1));
        let Some(second) = self.find_next_departure(&after_first).await? else {
            return Ok(None);
        };

        Ok(Some(DeparturePair { first, second }))
    }
}
