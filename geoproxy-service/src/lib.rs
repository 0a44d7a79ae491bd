//! geoproxy Service Library
//!
//! HTTP handlers, router and OpenAPI document for the Nominatim search relay.
//! This library is used by both the geoproxy-service binary and integration tests.

pub mod handlers;

use std::sync::Arc;

use axum::{routing::get, Router};
use geoproxy::SearchService;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across handlers.
pub struct AppState {
    /// Search service relaying queries to Nominatim.
    pub search_service: SearchService,
}

/// OpenAPI documentation for the geoproxy service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "geoproxy Search Relay",
        version = "0.1.0",
        description = "Relays free-text place searches to Nominatim and returns normalized {name, lat, lon} records.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
        contact(name = "Pedro Sanz Martinez", url = "https://github.com/pedrosanzmtz/geoproxy")
    ),
    paths(handlers::search, handlers::health_check),
    components(
        schemas(
            geoproxy::Place,
            handlers::ErrorResponse,
            handlers::UpstreamErrorResponse,
            handlers::HealthResponse,
        )
    ),
    tags(
        (name = "search", description = "Place search endpoints"),
        (name = "system", description = "System and health endpoints")
    )
)]
pub struct ApiDoc;

/// Build the application router.
///
/// Cross-origin requests are allowed from any origin.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/search", get(handlers::search))
        .route("/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

// Re-export commonly used types for convenience
pub use handlers::{ErrorResponse, HealthResponse, UpstreamErrorResponse};
