//! Departure extraction from an itinerary results page.
//!
//! The page has no machine-readable structure, so the scanner walks the
//! document keeping the tag path and a three-state position:
//!
//! - **before** the route section: waiting for the origin station heading
//! - **in** the route section: collecting line labels and departure times
//! - **after** the route section: the destination heading has been seen
//!
//! Within the section the latest line label is remembered, and every time
//! cell that follows a label matching the line filter replaces the stored
//! departure. The result is therefore the *last* qualifying time before the
//! destination heading.

use std::sync::LazyLock;

use chrono::NaiveTime;
use regex::Regex;
use tracing::trace;

use crate::domain::parse_twelve_hour;

use super::events::{PageEvent, page_events};
use super::signature::PageSignature;
use super::tag_path::TagPath;

/// Label used until a line label has been seen.
const UNKNOWN_LINE: &str = "unknown";

/// A departure time token at the start of a time cell, e.g. "5:32pm".
static TIME_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+:[0-9]+[a-z]+)").unwrap_or_else(|e| panic!("time token regex: {e}"))
});

/// Position of the scanner relative to the route section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ScanState {
    /// Origin heading not yet seen.
    BeforeRegion,
    /// Between origin and destination headings.
    InRegion,
    /// Destination heading seen; nothing more is recorded.
    AfterRegion,
}

/// What a scan found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Last qualifying departure, if any. `None` means "no train", not an error.
    pub departure: Option<NaiveTime>,
    /// Last line label seen inside the section (for diagnostics).
    pub line: String,
}

/// Streaming scanner for one results page.
#[derive(Debug)]
pub struct ScheduleExtractor<'a> {
    signature: &'a PageSignature,
    origin: &'a str,
    destination: &'a str,
    line_filter: &'a Regex,
    path: TagPath,
    state: ScanState,
    line: String,
    departure: Option<NaiveTime>,
}

impl<'a> ScheduleExtractor<'a> {
    /// Create a scanner looking for `line_filter` between two stations.
    pub fn new(
        signature: &'a PageSignature,
        origin: &'a str,
        destination: &'a str,
        line_filter: &'a Regex,
    ) -> Self {
        Self {
            signature,
            origin,
            destination,
            line_filter,
            path: TagPath::new(),
            state: ScanState::BeforeRegion,
            line: UNKNOWN_LINE.to_string(),
            departure: None,
        }
    }

    /// Current position relative to the route section.
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Forget everything from a previous document.
    pub fn reset(&mut self) {
        self.path.clear();
        self.state = ScanState::BeforeRegion;
        self.line = UNKNOWN_LINE.to_string();
        self.departure = None;
    }

    /// Handle an opening tag.
    pub fn open_tag(&mut self, name: &str) {
        self.path.open_tag(name);
    }

    /// Handle a run of text at the current position.
    pub fn text(&mut self, data: &str) {
        if self.state == ScanState::AfterRegion {
            return;
        }

        if self.path.ends_with(&self.signature.station_marker) {
            let name = data.trim();
            if name == self.origin {
                self.enter(ScanState::InRegion);
            } else if name == self.destination {
                self.enter(ScanState::AfterRegion);
            }
        }

        if self.state != ScanState::InRegion {
            return;
        }

        if self.path.ends_with(&self.signature.line_label)
            && data.chars().count() > self.signature.min_label_chars
        {
            self.line = data.to_string();
        }

        if self.path.innermost() == Some(self.signature.time_cell.as_str()) {
            self.time_cell(data);
        }
    }

    /// Handle one event.
    pub fn feed(&mut self, event: &PageEvent) {
        match event {
            PageEvent::OpenTag(name) => self.open_tag(name),
            PageEvent::Text(data) => self.text(data),
        }
    }

    /// Reset, then scan a whole document.
    pub fn scan(&mut self, html: &str) -> Extraction {
        self.reset();
        for event in page_events(html) {
            self.feed(&event);
        }
        self.extraction()
    }

    /// The result so far.
    pub fn extraction(&self) -> Extraction {
        Extraction {
            departure: self.departure,
            line: self.line.clone(),
        }
    }

    fn enter(&mut self, next: ScanState) {
        if next > self.state {
            trace!(from = ?self.state, to = ?next, "route section transition");
            self.state = next;
        }
    }

    fn time_cell(&mut self, data: &str) {
        // Only the label's first line is searched.
        let label = self.line.split('\n').next().unwrap_or_default();
        if !self.line_filter.is_match(label) {
            return;
        }

        let Some(token) = TIME_TOKEN.captures(data).and_then(|c| c.get(1)) else {
            return;
        };

        match parse_twelve_hour(token.as_str()) {
            Ok(time) => {
                trace!(line = %self.line, %time, "departure candidate");
                self.departure = Some(time);
            }
            Err(e) => trace!(token = token.as_str(), error = %e, "ignoring time cell"),
        }
    }
}

/// Scan `html` once with a fresh extractor.
pub fn extract_departure(
    html: &str,
    signature: &PageSignature,
    origin: &str,
    destination: &str,
    line_filter: &Regex,
) -> Extraction {
    ScheduleExtractor::new(signature, origin, destination, line_filter).scan(html)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::scan::test_pages::{marker, page, route_row};
    use proptest::prelude::*;

    fn twelve_hour(h: u32, m: u32) -> String {
        let suffix = if h < 12 { "am" } else { "pm" };
        let h12 = match h % 12 {
            0 => 12,
            n => n,
        };
        format!("{h12}:{m:02}{suffix}")
    }

    proptest! {
        /// Whatever the number of matching rows, the last one is reported
        #[test]
        fn reports_last_qualifying_row(times in prop::collection::vec((0u32..24, 0u32..60), 1..6)) {
            let mut parts = vec![marker("A")];
            parts.extend(times.iter().map(|(h, m)| route_row("Red Line", &twelve_hour(*h, *m))));
            parts.push(marker("B"));

            let sig = PageSignature::jorudan();
            let f = Regex::new("Red Line").unwrap();
            let found = extract_departure(&page(&parts), &sig, "A", "B", &f);

            let (h, m) = times[times.len() - 1];
            prop_assert_eq!(found.departure, NaiveTime::from_hms_opt(h, m, 0));
        }

        /// A destination heading before the origin always yields nothing
        #[test]
        fn destination_before_origin_never_matches(times in prop::collection::vec((0u32..24, 0u32..60), 0..4)) {
            let mut parts = vec![marker("B"), marker("A")];
            parts.extend(times.iter().map(|(h, m)| route_row("Red Line", &twelve_hour(*h, *m))));

            let sig = PageSignature::jorudan();
            let f = Regex::new("Red Line").unwrap();
            let found = extract_departure(&page(&parts), &sig, "A", "B", &f);
            prop_assert_eq!(found.departure, None);
        }
    }
}
