//! Operating window: when the clock should poll and light up.
//!
//! The window is a weekly table of time-of-day ranges, one list for weekdays
//! and one for weekends. Times are compared as HHMM integers (07:15 → 715),
//! and every range is half-open.

use std::fmt;

use chrono::{Datelike, NaiveDateTime};
use serde::Deserialize;

use crate::domain::hhmm;

/// Error returned for a malformed time range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time range {start}..{end}: {reason}")]
pub struct WindowError {
    start: u16,
    end: u16,
    reason: &'static str,
}

/// Half-open range of HHMM times, `[start, end)`.
#[derive(Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "[u16; 2]")]
pub struct TimeRange {
    start: u16,
    end: u16,
}

impl TimeRange {
    /// Create a range from HHMM bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use train_clock::schedule::TimeRange;
    ///
    /// let morning = TimeRange::new(700, 830).unwrap();
    /// assert!(morning.contains(715));
    /// assert!(!morning.contains(830));
    ///
    /// assert!(TimeRange::new(830, 700).is_err());
    /// assert!(TimeRange::new(760, 800).is_err());
    /// ```
    pub fn new(start: u16, end: u16) -> Result<Self, WindowError> {
        let err = |reason| WindowError { start, end, reason };

        if start >= end {
            return Err(err("start must be before end"));
        }
        if end > 2400 {
            return Err(err("end must be at most 2400"));
        }
        if start % 100 > 59 || (end % 100 > 59 && end != 2400) {
            return Err(err("minutes must be 00-59"));
        }

        Ok(Self { start, end })
    }

    pub fn start(&self) -> u16 {
        self.start
    }

    pub fn end(&self) -> u16 {
        self.end
    }

    /// True if `time` (HHMM) falls in the range.
    pub fn contains(&self, time: u16) -> bool {
        (self.start..self.end).contains(&time)
    }
}

impl TryFrom<[u16; 2]> for TimeRange {
    type Error = WindowError;

    fn try_from([start, end]: [u16; 2]) -> Result<Self, Self::Error> {
        Self::new(start, end)
    }
}

impl fmt::Debug for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:04}, {:04})", self.start, self.end)
    }
}

/// Which list of ranges a day uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayType {
    Weekday,
    Weekend,
}

/// How a moment is matched against the weekly table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowLookup {
    /// Legacy behaviour: Monday to Thursday count as weekdays,
    /// and the weekday ranges are checked whatever the day type.
    #[default]
    Inherited,
    /// Monday to Friday are weekdays, and each day type uses its own ranges.
    PerDayType,
}

/// Weekly table of active ranges.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WeeklyWindowTable {
    pub weekday: Vec<TimeRange>,
    pub weekend: Vec<TimeRange>,
}

impl WeeklyWindowTable {
    /// Ranges for one day type.
    pub fn ranges(&self, day: DayType) -> &[TimeRange] {
        match day {
            DayType::Weekday => &self.weekday,
            DayType::Weekend => &self.weekend,
        }
    }
}

impl Default for WeeklyWindowTable {
    fn default() -> Self {
        Self {
            weekday: vec![
                TimeRange { start: 700, end: 830 },
                TimeRange {
                    start: 1845,
                    end: 2345,
                },
            ],
            weekend: vec![TimeRange {
                start: 1000,
                end: 2345,
            }],
        }
    }
}

/// Decides whether the clock is in operation at a given moment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatingWindow {
    table: WeeklyWindowTable,
    lookup: WindowLookup,
}

impl OperatingWindow {
    /// Create a window from a table and a lookup policy.
    pub fn new(table: WeeklyWindowTable, lookup: WindowLookup) -> Self {
        Self { table, lookup }
    }

    pub fn lookup(&self) -> WindowLookup {
        self.lookup
    }

    /// Classify the day of `now`.
    pub fn day_type(&self, now: NaiveDateTime) -> DayType {
        // 0 = Sunday
        let day = now.weekday().num_days_from_sunday();
        let weekdays = match self.lookup {
            WindowLookup::Inherited => 1..5,
            WindowLookup::PerDayType => 1..6,
        };
        if weekdays.contains(&day) {
            DayType::Weekday
        } else {
            DayType::Weekend
        }
    }

    /// Ranges consulted for `now`.
    pub fn ranges_at(&self, now: NaiveDateTime) -> &[TimeRange] {
        let day = self.day_type(now);
        match self.lookup {
            WindowLookup::Inherited => self.table.ranges(DayType::Weekday),
            WindowLookup::PerDayType => self.table.ranges(day),
        }
    }

    /// True if polling and display should run at `now`.
    pub fn is_active(&self, now: NaiveDateTime) -> bool {
        let time = hhmm(now.time());
        self.ranges_at(now).iter().any(|r| r.contains(time))
    }
}

impl Default for OperatingWindow {
    fn default() -> Self {
        Self::new(WeeklyWindowTable::default(), WindowLookup::default())
    }
}
