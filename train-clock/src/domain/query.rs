//! Itinerary search queries.

use chrono::{Datelike, NaiveDateTime, Timelike};
use regex::Regex;

/// Fixed form fields the search endpoint requires on every request.
const PROTOCOL_FIELDS: [(&str, &str); 10] = [
    ("Sfromto", "from"),
    ("Sseat", "0"),
    ("Bsearch", "Search"),
    ("Knorikae", "Knorikae"),
    ("proc_mode", "K"),
    ("proc_sw", "11"),
    ("proc_sw_sub", "0"),
    ("from_nm", ""),
    ("to_nm", ""),
    ("Sfrom_sw", "1"),
];

/// A single itinerary lookup: which line leaves `origin` for `destination`
/// at or after `at`.
#[derive(Debug, Clone)]
pub struct ScheduleQuery {
    /// Station name as the site spells it.
    pub origin: String,
    pub destination: String,
    /// Departure search time (minute precision).
    pub at: NaiveDateTime,
    /// Pattern matched anywhere inside a row's line label.
    pub line_filter: Regex,
}

impl ScheduleQuery {
    /// Create a new query.
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        at: NaiveDateTime,
        line_filter: Regex,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            at,
            line_filter,
        }
    }

    /// Form fields for the search POST, in submission order.
    ///
    /// Values are raw; the HTTP layer percent-encodes them.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("from_in", self.origin.clone()),
            ("to_in", self.destination.clone()),
            (
                "Dyyyymm",
                format!("{:04}{:02}", self.at.year(), self.at.month()),
            ),
            ("Ddd", format!("{:02}", self.at.day())),
            ("Dhh", format!("{:02}", self.at.hour())),
            ("Dmn", format!("{:02}", self.at.minute())),
        ];
        fields.extend(
            PROTOCOL_FIELDS
                .iter()
                .map(|(k, v)| (*k, (*v).to_string())),
        );
        fields
    }
}
