//! Tests for RclClient::health().
//!
//! Health has no fail-open contract: unreachable hosts and error statuses
//! must come back as errors, not as a synthesized "ok".

use rcl_client::{RclApiError, RclClient, RclConfig};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(base_url: &str) -> RclClient {
    RclClient::new(RclConfig::new(base_url, "rcl_test_key").unwrap()).unwrap()
}

#[tokio::test]
async fn health_reports_service_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "ok",
            "db_healthy": true,
            "service": "rcl-proto",
            "mode": "shadow",
            "version": "0.2.0",
            "uptime_s": 12
        })))
        .expect(1)
        .mount(&server)
        .await;

    let health = client_for(&server.uri()).health().await.unwrap();
    assert_eq!(health.status, "ok");
    assert_eq!(health.db_healthy, Some(true));
    assert!(health.is_healthy());
    assert!(health.is_shadow_mode());
}

#[tokio::test]
async fn health_unreachable_is_an_error() {
    let result = client_for("http://127.0.0.1:1").health().await;
    match result {
        Err(RclApiError::Http { endpoint, .. }) => assert_eq!(endpoint, "GET /health"),
        other => panic!("expected Http error, got: {other:?}"),
    }
}

#[tokio::test]
async fn health_error_status_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(500).set_body_string("db locked"))
        .mount(&server)
        .await;

    let err = client_for(&server.uri()).health().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn health_honors_base_path_prefix() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rcl/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let health = client_for(&format!("{}/rcl/", server.uri()))
        .health()
        .await
        .unwrap();
    assert!(health.is_healthy());
}
