use super::*;
use crate::config::Config;
use crate::pipeline::test_helpers::create_test_acquirer_with;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

mod search;

/// Build a test router (plus the acquirer behind it) from the given config.
/// The returned tempdir must be kept alive for the duration of the test.
async fn create_test_app(config: Config) -> (Router, Arc<MediaAcquirer>, tempfile::TempDir) {
    let temp_dir = tempfile::tempdir().unwrap();
    let mut config = config;
    config.storage.data_dir = temp_dir.path().join("data");

    let (acquirer, _transcoder, temp_dir) = create_test_acquirer_with(config, temp_dir).await;
    let acquirer = Arc::new(acquirer);
    let config = acquirer.get_config();
    let search = Arc::new(SearchAggregator::new(config.clone()).unwrap());

    let app = create_router(acquirer.clone(), search, config);
    (app, acquirer, temp_dir)
}

/// Read a JSON response body
async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn api_server_spawns_and_stops_on_shutdown() {
    let temp_dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.storage.data_dir = temp_dir.path().join("data");
    config.server.api.bind_address = "127.0.0.1:0".parse().unwrap();

    let (acquirer, _transcoder, _temp_dir) = create_test_acquirer_with(config, temp_dir).await;
    let acquirer = Arc::new(acquirer);
    let handle = acquirer.spawn_api_server();

    // Give the listener a moment to bind, then request shutdown
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    acquirer.shutdown();

    let result = tokio::time::timeout(std::time::Duration::from_secs(5), handle)
        .await
        .expect("server should stop after shutdown")
        .expect("server task should not panic");
    assert!(result.is_ok(), "server error: {:?}", result);
}

#[tokio::test]
async fn cors_headers_present_when_enabled() {
    let (app, _acquirer, _temp_dir) = create_test_app(Config::default()).await;

    let request = Request::builder()
        .uri("/health")
        .header("Origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .contains_key("access-control-allow-origin"),
        "CORS headers should be present"
    );
}

#[tokio::test]
async fn cors_absent_when_disabled() {
    let mut config = Config::default();
    config.server.api.cors_enabled = false;
    let (app, _acquirer, _temp_dir) = create_test_app(config).await;

    let request = Request::builder()
        .uri("/health")
        .header("Origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        !response
            .headers()
            .contains_key("access-control-allow-origin")
    );
}
