//! Jorudan route search HTTP client.
//!
//! Posts a route search form and returns the results page as text.

use std::time::Duration;

use tracing::debug;

use crate::domain::ScheduleQuery;
use crate::schedule::ScheduleFetcher;

use super::error::FetchError;

/// Default route search endpoint (English site).
pub const DEFAULT_BASE_URL: &str = "http://world.jorudan.co.jp/norikae/cgi-bin/engkeyin.cgi";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the Jorudan client.
#[derive(Debug, Clone)]
pub struct JorudanConfig {
    /// Search endpoint URL
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl JorudanConfig {
    /// Create a config pointing at the public site.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom endpoint (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for JorudanConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP client for the route search form.
#[derive(Debug, Clone)]
pub struct JorudanClient {
    http: reqwest::Client,
    base_url: String,
}

impl JorudanClient {
    /// Create a new client with the given configuration.
    pub fn new(config: JorudanConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Post the search form for `query` and return the results page.
    pub async fn search(&self, query: &ScheduleQuery) -> Result<String, FetchError> {
        debug!(
            origin = %query.origin,
            destination = %query.destination,
            at = %query.at,
            "posting route search"
        );

        let response = self
            .http
            .post(&self.base_url)
            .form(&query.form_fields())
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: body.chars().take(500).collect(),
            });
        }

        Ok(response.text().await?)
    }
}

impl ScheduleFetcher for JorudanClient {
    async fn fetch(&self, query: &ScheduleQuery) -> Result<String, FetchError> {
        self.search(query).await
    }
}
