//! Integration tests for the search service against a mock Nominatim.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use geoproxy::{SearchError, SearchServiceBuilder};
use serde_json::json;

/// A request as seen by the mock upstream.
#[derive(Debug, Clone)]
struct RecordedRequest {
    params: HashMap<String, String>,
    user_agent: Option<String>,
}

/// Canned Nominatim behaviour.
#[derive(Clone)]
struct MockUpstream {
    status: StatusCode,
    body: String,
    delay: Duration,
    calls: Arc<AtomicUsize>,
    last_request: Arc<Mutex<Option<RecordedRequest>>>,
}

impl MockUpstream {
    fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: Duration::ZERO,
            calls: Arc::new(AtomicUsize::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_request(&self) -> RecordedRequest {
        self.last_request.lock().unwrap().clone().unwrap()
    }
}

async fn mock_search(
    State(mock): State<MockUpstream>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    mock.calls.fetch_add(1, Ordering::SeqCst);
    *mock.last_request.lock().unwrap() = Some(RecordedRequest {
        params,
        user_agent: headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });

    if !mock.delay.is_zero() {
        tokio::time::sleep(mock.delay).await;
    }

    (
        mock.status,
        [(header::CONTENT_TYPE, "application/json")],
        mock.body.clone(),
    )
}

/// Serve the mock on an ephemeral port and return its base URL.
async fn spawn_upstream(mock: MockUpstream) -> String {
    let app = Router::new()
        .route("/search", get(mock_search))
        .with_state(mock);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_search_sends_expected_request() {
    let mock = MockUpstream::new(StatusCode::OK, "[]");
    let base_url = spawn_upstream(mock.clone()).await;

    let service = SearchServiceBuilder::new()
        .base_url(base_url)
        .build()
        .unwrap();
    let places = service.search(Some("Eiffel Tower, Paris")).await.unwrap();
    assert!(places.is_empty());

    let request = mock.last_request();
    assert_eq!(request.params["q"], "Eiffel Tower, Paris");
    assert_eq!(request.params["format"], "json");
    assert_eq!(request.params["addressdetails"], "1");
    assert_eq!(request.params["limit"], "10");
    assert_eq!(request.user_agent.as_deref(), Some("free-location-app"));
}

#[tokio::test]
async fn test_search_forwards_query_untrimmed() {
    let mock = MockUpstream::new(StatusCode::OK, "[]");
    let base_url = spawn_upstream(mock.clone()).await;

    let service = SearchServiceBuilder::new()
        .base_url(base_url)
        .build()
        .unwrap();
    service.search(Some("  Eiffel Tower ")).await.unwrap();

    assert_eq!(mock.last_request().params["q"], "  Eiffel Tower ");
}

#[tokio::test]
async fn test_search_normalizes_results() {
    let body = json!([
        {"place_id": 1, "display_name": "Paris, France", "lat": "48.85", "lon": "2.35"},
        {"place_id": 2, "display_name": "Paris, Texas", "lon": "-95.55"},
        {"place_id": 3, "display_name": "Paris, Ontario", "lat": "43.19", "lon": "-80.38"}
    ]);
    let mock = MockUpstream::new(StatusCode::OK, body.to_string());
    let base_url = spawn_upstream(mock).await;

    let service = SearchServiceBuilder::new()
        .base_url(base_url)
        .build()
        .unwrap();
    let places = service.search(Some("Paris")).await.unwrap();

    assert_eq!(places.len(), 2);
    assert_eq!(places[0].name, "Paris, France");
    assert_eq!(places[1].name, "Paris, Ontario");
    assert_eq!(places[1].lat, "43.19");
}

#[tokio::test]
async fn test_search_custom_limit_and_user_agent() {
    let mock = MockUpstream::new(StatusCode::OK, "[]");
    let base_url = spawn_upstream(mock.clone()).await;

    let service = SearchServiceBuilder::new()
        .base_url(base_url)
        .user_agent("geoproxy-tests")
        .limit(3)
        .build()
        .unwrap();
    service.search(Some("Rome")).await.unwrap();

    let request = mock.last_request();
    assert_eq!(request.params["limit"], "3");
    assert_eq!(request.user_agent.as_deref(), Some("geoproxy-tests"));
}

#[tokio::test]
async fn test_search_invalid_query_makes_no_call() {
    let mock = MockUpstream::new(StatusCode::OK, "[]");
    let base_url = spawn_upstream(mock.clone()).await;

    let service = SearchServiceBuilder::new()
        .base_url(base_url)
        .build()
        .unwrap();

    let result = service.search(Some("  ")).await;
    assert!(matches!(result, Err(SearchError::InvalidQuery)));
    assert_eq!(mock.calls(), 0);
}

#[tokio::test]
async fn test_search_non_array_payload() {
    let mock = MockUpstream::new(StatusCode::OK, r#"{"error":"Unable to geocode"}"#);
    let base_url = spawn_upstream(mock).await;

    let service = SearchServiceBuilder::new()
        .base_url(base_url)
        .build()
        .unwrap();
    let result = service.search(Some("Paris")).await;
    assert!(matches!(result, Err(SearchError::InvalidResponseFormat)));
}

#[tokio::test]
async fn test_search_non_json_payload() {
    let mock = MockUpstream::new(StatusCode::OK, "<html>maintenance</html>");
    let base_url = spawn_upstream(mock).await;

    let service = SearchServiceBuilder::new()
        .base_url(base_url)
        .build()
        .unwrap();
    let result = service.search(Some("Paris")).await;
    assert!(matches!(result, Err(SearchError::InvalidResponseFormat)));
}

#[tokio::test]
async fn test_search_upstream_status() {
    let mock = MockUpstream::new(
        StatusCode::TOO_MANY_REQUESTS,
        r#"{"message":"rate limited"}"#,
    );
    let base_url = spawn_upstream(mock).await;

    let service = SearchServiceBuilder::new()
        .base_url(base_url)
        .build()
        .unwrap();
    match service.search(Some("Paris")).await {
        Err(SearchError::UpstreamStatus { status, details }) => {
            assert_eq!(status, 429);
            assert_eq!(details, json!({"message": "rate limited"}));
        }
        other => panic!("Expected UpstreamStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn test_search_timeout() {
    let mock = MockUpstream::new(StatusCode::OK, "[]").with_delay(Duration::from_secs(2));
    let base_url = spawn_upstream(mock).await;

    let service = SearchServiceBuilder::new()
        .base_url(base_url)
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();
    match service.search(Some("Paris")).await {
        Err(SearchError::Timeout { timeout_ms }) => assert_eq!(timeout_ms, 200),
        other => panic!("Expected Timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn test_search_connection_refused() {
    // Bind then drop to get a port with nothing listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let service = SearchServiceBuilder::new()
        .base_url(format!("http://{}", addr))
        .build()
        .unwrap();
    let result = service.search(Some("Paris")).await;
    assert!(matches!(result, Err(SearchError::Http(_))));
}
