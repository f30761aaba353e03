//! Four-digit display codes.

use std::fmt;

use chrono::{NaiveTime, Timelike};

/// Error returned when parsing an invalid display code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid display code: {reason}")]
pub struct InvalidCode {
    reason: &'static str,
}

/// A four-digit code as shown on the clock, e.g. `"0710"` for 07:10.
///
/// Codes are always exactly 4 ASCII decimal digits. This type guarantees
/// that any `DisplayCode` value is valid by construction.
///
/// # Examples
///
/// ```
/// use train_clock::domain::DisplayCode;
/// use chrono::NaiveTime;
///
/// let code = DisplayCode::parse("0710").unwrap();
/// assert_eq!(code.digits(), [0, 7, 1, 0]);
///
/// let time = NaiveTime::from_hms_opt(17, 32, 0).unwrap();
/// assert_eq!(DisplayCode::from_time(time).as_str(), "1732");
///
/// // Wrong length or non-digits are rejected
/// assert!(DisplayCode::parse("710").is_err());
/// assert!(DisplayCode::parse("07:1").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayCode([u8; 4]);

impl DisplayCode {
    /// The placeholder shown before any departure has been resolved.
    pub const PLACEHOLDER: DisplayCode = DisplayCode(*b"0000");

    /// Parse a code from a string of exactly 4 ASCII digits.
    pub fn parse(s: &str) -> Result<Self, InvalidCode> {
        let bytes = s.as_bytes();

        if bytes.len() != 4 {
            return Err(InvalidCode {
                reason: "must be exactly 4 characters",
            });
        }

        if !bytes.iter().all(u8::is_ascii_digit) {
            return Err(InvalidCode {
                reason: "must be ASCII digits 0-9",
            });
        }

        Ok(DisplayCode([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Zero-padded HHMM code for a time of day.
    pub fn from_time(time: NaiveTime) -> Self {
        let (h, m) = (time.hour(), time.minute());
        let digit = |n: u32| b'0' + (n % 10) as u8;
        DisplayCode([digit(h / 10), digit(h), digit(m / 10), digit(m)])
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII digits are ever stored.
        std::str::from_utf8(&self.0).unwrap_or("0000")
    }

    /// The four single-digit values, in display order.
    pub fn digits(&self) -> [u8; 4] {
        self.0.map(|b| b - b'0')
    }
}

impl Default for DisplayCode {
    fn default() -> Self {
        Self::PLACEHOLDER
    }
}

impl fmt::Debug for DisplayCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DisplayCode({})", self.as_str())
    }
}

impl fmt::Display for DisplayCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
