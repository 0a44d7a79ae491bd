//! Nominatim HTTP client.
//!
//! This module issues the upstream `/search` request and classifies its
//! failures. It knows nothing about the relay's own HTTP surface; callers map
//! [`SearchError`] variants to status codes.
//!
//! # Request Shape
//!
//! ```text
//! GET {base_url}/search?q=<query>&format=json&addressdetails=1&limit=10
//! User-Agent: free-location-app
//! ```
//!
//! The whole exchange (connect, headers and body) is bounded by the
//! configured timeout, 5 seconds by default.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::error::{Result, SearchError};

/// Public Nominatim instance.
pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// User agent sent upstream; Nominatim's usage policy requires one.
pub const DEFAULT_USER_AGENT: &str = "free-location-app";

/// Default timeout for the upstream request in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Default number of results requested from Nominatim.
pub const DEFAULT_RESULT_LIMIT: u32 = 10;

/// Configuration for the upstream client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the Nominatim instance, without the `/search` path.
    pub base_url: String,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Maximum number of results requested.
    pub limit: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            limit: DEFAULT_RESULT_LIMIT,
        }
    }
}

impl ClientConfig {
    /// Create a configuration pointing at another Nominatim instance.
    ///
    /// # Example
    ///
    /// ```
    /// use geoproxy::client::ClientConfig;
    ///
    /// let config = ClientConfig::with_base_url("http://localhost:8088");
    /// assert_eq!(config.search_url(), "http://localhost:8088/search");
    /// assert_eq!(config.timeout_ms, 5000);
    /// ```
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the result limit.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Full URL of the search endpoint.
    pub fn search_url(&self) -> String {
        format!("{}/search", self.base_url.trim_end_matches('/'))
    }
}

/// Client for the Nominatim search endpoint.
///
/// Cheap to share: the inner [`reqwest::Client`] pools connections.
pub struct NominatimClient {
    client: Client,
    config: ClientConfig,
}

impl NominatimClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::ClientBuild`] if the base URL is empty or the
    /// underlying HTTP client cannot be created (e.g. TLS initialization).
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(SearchError::ClientBuild {
                reason: "Nominatim base URL is empty".to_string(),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| SearchError::ClientBuild {
                reason: e.to_string(),
            })?;

        Ok(Self { client, config })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Run a search and return the raw upstream payload.
    ///
    /// A 2xx body that is not JSON is returned as a JSON string so that the
    /// caller's format check rejects it.
    ///
    /// # Errors
    ///
    /// - [`SearchError::Timeout`] if the request exceeds the timeout
    /// - [`SearchError::UpstreamStatus`] on a non-2xx answer
    /// - [`SearchError::Http`] for any other transport failure
    pub async fn search(&self, query: &str) -> Result<Value> {
        let limit = self.config.limit.to_string();
        let params = [
            ("q", query),
            ("format", "json"),
            ("addressdetails", "1"),
            ("limit", limit.as_str()),
        ];

        let response = self
            .client
            .get(self.config.search_url())
            .query(&params)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| self.classify(e))?;

        if !status.is_success() {
            return Err(SearchError::UpstreamStatus {
                status: status.as_u16(),
                details: parse_body(&body),
            });
        }

        Ok(parse_body(&body))
    }

    fn classify(&self, error: reqwest::Error) -> SearchError {
        if error.is_timeout() {
            SearchError::Timeout {
                timeout_ms: self.config.timeout_ms,
            }
        } else {
            SearchError::Http(error)
        }
    }
}

/// Parse a response body as JSON, falling back to its text.
///
/// An empty body is kept as an empty string.
fn parse_body(body: &[u8]) -> Value {
    if body.is_empty() {
        return Value::String(String::new());
    }
    serde_json::from_slice(body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
}
