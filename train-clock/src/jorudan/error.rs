//! Fetch error types.

use std::path::PathBuf;

/// Errors from fetching an itinerary results page.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed (network error, timeout, body decoding)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The site answered with a non-success status
    #[error("site returned {status}: {body}")]
    Status { status: u16, body: String },

    /// No page available for this query (offline fetcher)
    #[error("no page available: {0}")]
    Unavailable(String),

    /// Reading saved pages from disk failed (offline fetcher)
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FetchError::Status {
            status: 503,
            body: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "site returned 503: Service Unavailable");

        let err = FetchError::Unavailable("07:06".into());
        assert_eq!(err.to_string(), "no page available: 07:06");

        let err = FetchError::Io {
            path: PathBuf::from("pages"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.to_string(), "failed to read \"pages\": not found");
    }
}
