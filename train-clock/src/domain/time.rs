//! Time handling for itinerary pages and the operating window.
//!
//! The itinerary site prints departures on a 12-hour clock ("5:32pm") with no
//! date. This module converts those to 24-hour times and places them on the
//! correct date relative to the moment that was searched for.

use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Format used by the itinerary page for departure times.
const TWELVE_HOUR_FORMAT: &str = "%I:%M%p";

/// If a departure appears more than this many hours before the searched-for
/// time, it is taken to be on the following day.
const ROLLOVER_THRESHOLD_HOURS: i64 = 12;

/// Parse a 12-hour "H:MMam" / "H:MMpm" time into a 24-hour time.
///
/// # Examples
///
/// ```
/// use train_clock::domain::parse_twelve_hour;
/// use chrono::NaiveTime;
///
/// assert_eq!(
///     parse_twelve_hour("5:32pm").unwrap(),
///     NaiveTime::from_hms_opt(17, 32, 0).unwrap()
/// );
/// assert_eq!(
///     parse_twelve_hour("12:05am").unwrap(),
///     NaiveTime::from_hms_opt(0, 5, 0).unwrap()
/// );
///
/// assert!(parse_twelve_hour("13:00pm").is_err());
/// assert!(parse_twelve_hour("five thirty").is_err());
/// ```
pub fn parse_twelve_hour(s: &str) -> Result<NaiveTime, TimeError> {
    if !s.contains(':') {
        return Err(TimeError::new("expected H:MM followed by am/pm"));
    }

    NaiveTime::parse_from_str(s.trim(), TWELVE_HOUR_FORMAT)
        .map_err(|_| TimeError::new("not a 12-hour time"))
}

/// Time of day as an HHMM integer, e.g. 07:15 → 715.
pub fn hhmm(time: NaiveTime) -> u16 {
    (time.hour() * 100 + time.minute()) as u16
}

/// Drop seconds and sub-second precision.
pub fn truncate_to_minute(at: NaiveDateTime) -> NaiveDateTime {
    at.date()
        .and_hms_opt(at.hour(), at.minute(), 0)
        .unwrap_or(at)
}

/// Place a time of day found on a page onto the date of the search.
///
/// Searches late in the evening may return departures after midnight; those
/// are moved to the following day so that results stay ordered after `at`.
pub fn resolve_departure(at: NaiveDateTime, departure: NaiveTime) -> NaiveDateTime {
    let same_day = at.date().and_time(departure);
    if at.signed_duration_since(same_day) > Duration::hours(ROLLOVER_THRESHOLD_HOURS) {
        same_day + Duration::days(1)
    } else {
        same_day
    }
}
