//! Error types for the geoproxy library.

use thiserror::Error;

/// Errors that can occur while relaying a search to Nominatim.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The `q` parameter is missing, repeated, or blank.
    #[error("Missing or invalid ?q= query parameter")]
    InvalidQuery,

    /// Nominatim answered 2xx but the body is not a JSON list.
    #[error("Invalid response format from Nominatim API")]
    InvalidResponseFormat,

    /// The upstream call did not complete within the configured timeout.
    #[error("Request to Nominatim API timed out")]
    Timeout { timeout_ms: u64 },

    /// Nominatim answered with a non-2xx status.
    #[error("Nominatim API responded with error")]
    UpstreamStatus {
        status: u16,
        details: serde_json::Value,
    },

    /// Any other transport failure (DNS, connection refused, broken body...).
    #[error("Upstream request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The HTTP client could not be constructed.
    #[error("Failed to create HTTP client: {reason}")]
    ClientBuild { reason: String },
}

/// Result type alias using [`SearchError`].
pub type Result<T> = std::result::Result<T, SearchError>;
