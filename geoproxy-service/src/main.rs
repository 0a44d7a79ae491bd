//! geoproxy Service - HTTP relay for Nominatim place searches.
//!
//! Accepts a free-text query, forwards it to Nominatim and returns the
//! matches as `{name, lat, lon}` records.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `GEOPROXY_PORT` | HTTP server port | 3000 |
//! | `GEOPROXY_UPSTREAM_URL` | Base URL of the Nominatim instance | `https://nominatim.openstreetmap.org` |
//! | `GEOPROXY_USER_AGENT` | User-Agent sent upstream | `free-location-app` |
//! | `GEOPROXY_TIMEOUT_MS` | Upstream timeout in milliseconds | 5000 |
//! | `GEOPROXY_RESULT_LIMIT` | Number of results requested upstream | 10 |
//! | `RUST_LOG` | Log level (e.g., "info", "debug") | "info" |
//!
//! ## Endpoints
//!
//! - `GET /api/search?q=...` - Search places
//! - `GET /health` - Health check
//! - `GET /docs` - OpenAPI documentation (Swagger UI)

use std::net::SocketAddr;
use std::sync::Arc;

use geoproxy::SearchServiceBuilder;
use geoproxy_service::{router, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Port used when `GEOPROXY_PORT` is unset or invalid.
const DEFAULT_PORT: u16 = 3000;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geoproxy_service=info,geoproxy=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load port from environment (service-specific config)
    let port: u16 = std::env::var("GEOPROXY_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    // The library handles: GEOPROXY_UPSTREAM_URL, GEOPROXY_USER_AGENT,
    // GEOPROXY_TIMEOUT_MS, GEOPROXY_RESULT_LIMIT
    let search_service = SearchServiceBuilder::from_env().build()?;

    tracing::info!(
        upstream = search_service.upstream_url(),
        timeout_ms = u64::try_from(search_service.timeout().as_millis()).unwrap_or(u64::MAX),
        limit = search_service.limit(),
        port = port,
        "Starting geoproxy service"
    );

    let state = Arc::new(AppState { search_service });
    let app = router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
