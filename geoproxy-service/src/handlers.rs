//! HTTP request handlers for the search relay.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use geoproxy::{query::single_param, Place, SearchError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::AppState;

/// Body returned for unclassified failures.
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Error response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    pub error: String,
}

/// Error response when Nominatim answers with a non-2xx status.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpstreamErrorResponse {
    /// Error message.
    pub error: String,
    /// Status code returned by Nominatim.
    pub status: u16,
    /// Nominatim's response body: JSON when it parses, raw text otherwise.
    #[schema(value_type = Object)]
    pub details: serde_json::Value,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

/// Search places by free text.
///
/// # Query Parameters
///
/// - `q`: Free-text search, e.g. `Paris` or `10 Downing Street, London`
///
/// # Returns
///
/// - `200 OK` with a list of `{name, lat, lon}` records
/// - `400 Bad Request` if `q` is missing, repeated or blank
/// - `502 Bad Gateway` if Nominatim does not answer with a list
/// - `504 Gateway Timeout` if Nominatim does not answer in time
/// - Nominatim's own status if it answers with an error
/// - `500 Internal Server Error` on unexpected errors
#[utoipa::path(
    get,
    path = "/api/search",
    tag = "search",
    params(
        ("q" = String, Query, description = "Free-text search query")
    ),
    responses(
        (status = 200, description = "Matching places in Nominatim order", body = [Place]),
        (status = 400, description = "Missing or invalid query", body = ErrorResponse),
        (status = 502, description = "Malformed Nominatim payload", body = ErrorResponse),
        (status = 504, description = "Nominatim timed out", body = ErrorResponse),
        (status = 500, description = "Unexpected failure", body = ErrorResponse),
        (status = "4XX", description = "Nominatim error, status passed through", body = UpstreamErrorResponse),
    )
)]
#[axum::debug_handler]
pub async fn search(
    State(state): State<Arc<AppState>>,
    params: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let pairs = match params {
        Ok(Query(pairs)) => pairs,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unparseable query string");
            return error_response(None, SearchError::InvalidQuery);
        }
    };
    let query = single_param(&pairs, "q");

    tracing::debug!(query = ?query, "Search query");

    match state.search_service.search(query).await {
        Ok(places) => {
            tracing::info!(query = ?query, results = places.len(), "Search succeeded");
            (StatusCode::OK, Json(places)).into_response()
        }
        Err(e) => error_response(query, e),
    }
}

/// Map a search error to its HTTP response.
pub fn error_response(query: Option<&str>, e: SearchError) -> Response {
    let message = e.to_string();

    match e {
        SearchError::InvalidQuery => {
            (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: message })).into_response()
        }
        SearchError::InvalidResponseFormat => {
            tracing::warn!(query = ?query, "Nominatim returned a non-list payload");
            (StatusCode::BAD_GATEWAY, Json(ErrorResponse { error: message })).into_response()
        }
        SearchError::Timeout { timeout_ms } => {
            tracing::warn!(query = ?query, timeout_ms = timeout_ms, "Nominatim timed out");
            (
                StatusCode::GATEWAY_TIMEOUT,
                Json(ErrorResponse { error: message }),
            )
                .into_response()
        }
        SearchError::UpstreamStatus { status, details } => {
            tracing::warn!(query = ?query, status = status, "Nominatim responded with error");
            let code = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            (
                code,
                Json(UpstreamErrorResponse {
                    error: message,
                    status,
                    details,
                }),
            )
                .into_response()
        }
        SearchError::Http(_) | SearchError::ClientBuild { .. } => {
            tracing::error!(query = ?query, error = %message, "Unexpected error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: INTERNAL_ERROR_MESSAGE.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// Health check endpoint.
///
/// Returns service status and version.
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
