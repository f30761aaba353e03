//! Clock configuration.
//!
//! Everything has a default matching the Tameike-Sanno → Shibuya
//! clock, so a config file only needs the keys that differ. The file is TOML;
//! its path comes from `TRAIN_CLOCK_CONFIG`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use regex::Regex;
use serde::Deserialize;

use crate::jorudan::DEFAULT_BASE_URL;
use crate::scan::PageSignature;
use crate::schedule::{OperatingWindow, WeeklyWindowTable, WindowLookup};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "TRAIN_CLOCK_CONFIG";

/// Errors from loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    /// Line filter is not a valid regular expression
    #[error("invalid line filter: {0}")]
    LineFilter(#[from] regex::Error),

    /// A value is out of range
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration for the clock.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Departure station, spelled as on the site.
    pub origin: String,

    /// Arrival station, spelled as on the site.
    pub destination: String,

    /// Only departures on lines whose label matches this pattern count.
    pub line_filter: String,

    /// Time to walk to the station (minutes).
    /// Departures sooner than this are not worth showing.
    pub walk_minutes: i64,

    /// How long each departure stays on the display (seconds).
    pub display_delay_secs: u64,

    /// Pause between departure lookups (seconds).
    pub schedule_refresh_secs: u64,

    /// Pause between window checks while outside the operating window (seconds).
    pub idle_secs: u64,

    /// HTTP request timeout (seconds).
    pub request_timeout_secs: u64,

    /// Route search endpoint.
    pub base_url: String,

    /// Serve pages from this directory instead of the network.
    pub mock_pages: Option<PathBuf>,

    /// When the clock runs.
    pub window: WeeklyWindowTable,

    /// How `window` is consulted.
    pub window_lookup: WindowLookup,

    /// Tag-path patterns of the results page.
    pub page: PageSignature,
}

impl ClockConfig {
    /// Load from a TOML file, filling unspecified keys with defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the file named by `TRAIN_CLOCK_CONFIG`, or use defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Check values that the type system cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.origin.trim().is_empty() || self.destination.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "origin and destination must be set".to_string(),
            ));
        }
        if self.walk_minutes < 0 {
            return Err(ConfigError::Invalid(
                "walk_minutes must not be negative".to_string(),
            ));
        }
        if self.display_delay_secs == 0 || self.schedule_refresh_secs == 0 || self.idle_secs == 0
        {
            return Err(ConfigError::Invalid(
                "loop periods must be at least one second".to_string(),
            ));
        }
        self.line_filter()?;
        Ok(())
    }

    /// The compiled line filter.
    pub fn line_filter(&self) -> Result<Regex, ConfigError> {
        Ok(Regex::new(&self.line_filter)?)
    }

    /// Returns the walk time as a chrono Duration.
    pub fn walk(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.walk_minutes)
    }

    /// Returns the display hold time.
    pub fn display_delay(&self) -> Duration {
        Duration::from_secs(self.display_delay_secs)
    }

    /// Returns the lookup period.
    pub fn schedule_refresh(&self) -> Duration {
        Duration::from_secs(self.schedule_refresh_secs)
    }

    /// Returns the idle period.
    pub fn idle(&self) -> Duration {
        Duration::from_secs(self.idle_secs)
    }

    /// The operating window described by `window` and `window_lookup`.
    pub fn operating_window(&self) -> OperatingWindow {
        OperatingWindow::new(self.window.clone(), self.window_lookup)
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            origin: "Tameikesan-No".to_string(),
            destination: "Shibuya".to_string(),
            line_filter: "Ginza Line".to_string(),
            walk_minutes: 6,
            display_delay_secs: 2,
            schedule_refresh_secs: 60,
            idle_secs: 60,
            request_timeout_secs: 30,
            base_url: DEFAULT_BASE_URL.to_string(),
            mock_pages: None,
            window: WeeklyWindowTable::default(),
            window_lookup: WindowLookup::Inherited,
            page: PageSignature::jorudan(),
        }
    }
}
