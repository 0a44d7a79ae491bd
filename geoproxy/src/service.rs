//! Search service: validate, call Nominatim, normalize.

use std::time::Duration;

use crate::client::{ClientConfig, NominatimClient};
use crate::error::{Result, SearchError};
use crate::place::{normalize_places, Place};
use crate::query::validate_query;

/// Relays search queries to Nominatim and normalizes the results.
///
/// The service holds no mutable state; share it behind an `Arc` and call
/// [`SearchService::search`] concurrently.
///
/// # Example
///
/// ```ignore
/// use geoproxy::SearchService;
///
/// let service = SearchService::builder().build()?;
/// let places = service.search(Some("Paris")).await?;
/// for place in places {
///     println!("{} ({}, {})", place.name, place.lat, place.lon);
/// }
/// ```
pub struct SearchService {
    client: NominatimClient,
}

impl SearchService {
    /// Create a service with the given upstream configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::ClientBuild`] if the HTTP client cannot be
    /// created.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            client: NominatimClient::new(config)?,
        })
    }

    /// Create a builder for more configuration options.
    pub fn builder() -> SearchServiceBuilder {
        SearchServiceBuilder::new()
    }

    /// Search for places matching `query`.
    ///
    /// `query` is the raw value of the caller's `q` parameter; `None` means it
    /// was missing or not a single string.
    ///
    /// # Returns
    ///
    /// Places in upstream order. Records lacking a name or coordinates are
    /// left out.
    ///
    /// # Errors
    ///
    /// - [`SearchError::InvalidQuery`] before any network call if the query is
    ///   missing or blank
    /// - [`SearchError::InvalidResponseFormat`] if Nominatim does not answer
    ///   with a list
    /// - [`SearchError::Timeout`], [`SearchError::UpstreamStatus`],
    ///   [`SearchError::Http`] from the upstream call
    pub async fn search(&self, query: Option<&str>) -> Result<Vec<Place>> {
        let query = validate_query(query)?;

        tracing::debug!(query = query, "Forwarding search to Nominatim");

        let payload = self.client.search(query).await?;
        let places = normalize_places(&payload)?;

        tracing::debug!(query = query, results = places.len(), "Search complete");

        Ok(places)
    }

    /// Base URL of the upstream Nominatim instance.
    pub fn upstream_url(&self) -> &str {
        &self.client.config().base_url
    }

    /// Upstream request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.client.config().timeout_ms)
    }

    /// Number of results requested upstream.
    pub fn limit(&self) -> u32 {
        self.client.config().limit
    }
}

/// Builder for [`SearchService`].
///
/// # Example
///
/// ```ignore
/// use std::time::Duration;
/// use geoproxy::SearchServiceBuilder;
///
/// let service = SearchServiceBuilder::new()
///     .base_url("http://localhost:8088")
///     .timeout(Duration::from_secs(2))
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct SearchServiceBuilder {
    config: ClientConfig,
}

impl SearchServiceBuilder {
    /// Create a builder with the public Nominatim defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder configured from environment variables.
    ///
    /// # Environment Variables
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `GEOPROXY_UPSTREAM_URL` | Base URL of the Nominatim instance | `https://nominatim.openstreetmap.org` |
    /// | `GEOPROXY_USER_AGENT` | User-Agent sent upstream | `free-location-app` |
    /// | `GEOPROXY_TIMEOUT_MS` | Upstream timeout in milliseconds | 5000 |
    /// | `GEOPROXY_RESULT_LIMIT` | Number of results requested | 10 |
    ///
    /// Unset or unparseable values keep their default.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Create a builder from an arbitrary variable lookup.
    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut builder = Self::new();

        if let Some(url) = lookup("GEOPROXY_UPSTREAM_URL").filter(|s| !s.trim().is_empty()) {
            builder = builder.base_url(url);
        }
        if let Some(agent) = lookup("GEOPROXY_USER_AGENT").filter(|s| !s.trim().is_empty()) {
            builder = builder.user_agent(agent);
        }
        if let Some(ms) = lookup("GEOPROXY_TIMEOUT_MS").and_then(|s| s.trim().parse::<u64>().ok())
        {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        if let Some(limit) =
            lookup("GEOPROXY_RESULT_LIMIT").and_then(|s| s.trim().parse::<u32>().ok())
        {
            builder = builder.limit(limit);
        }

        builder
    }

    /// Set the Nominatim base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Set the upstream timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the number of results requested upstream.
    pub fn limit(mut self, limit: u32) -> Self {
        self.config.limit = limit;
        self
    }

    /// The configuration collected so far.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build the [`SearchService`].
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::ClientBuild`] if the base URL is empty or the
    /// HTTP client cannot be created.
    pub fn build(self) -> Result<SearchService> {
        SearchService::new(self.config)
    }
}

impl From<ClientConfig> for SearchServiceBuilder {
    fn from(config: ClientConfig) -> Self {
        Self { config }
    }
}
