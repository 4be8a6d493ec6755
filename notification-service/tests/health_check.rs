mod common;

use common::TestApp;
use notification_service::services::init_metrics;
use reqwest::Client;
use serde_json::json;

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body, json!({ "status": "healthy" }));
}

#[tokio::test]
async fn health_and_identity_ignore_table_contents() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let empty_health: serde_json::Value = client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let empty_root: serde_json::Value = client
        .get(format!("{}/", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    app.send(&json!({ "recipient": "bob", "message": "hello", "type": "sms" }))
        .await;

    let health: serde_json::Value = client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let root: serde_json::Value = client
        .get(format!("{}/", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(health, empty_health);
    assert_eq!(root, empty_root);
    assert_eq!(
        root,
        json!({ "service": "notification-service", "status": "running" })
    );
}

#[tokio::test]
async fn readiness_check_works() {
    let app = TestApp::spawn().await;

    let response = Client::new()
        .get(format!("{}/ready", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn request_id_is_echoed() {
    let app = TestApp::spawn().await;

    let response = Client::new()
        .get(format!("{}/health", app.address))
        .header("x-request-id", "req-42")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.headers()["x-request-id"], "req-42");
}

#[tokio::test]
async fn cors_preflight_allows_any_origin() {
    let app = TestApp::spawn().await;

    let response = Client::new()
        .request(
            reqwest::Method::OPTIONS,
            format!("{}/notifications/send", app.address),
        )
        .header("origin", "https://somewhere.example")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn metrics_endpoint_returns_prometheus_format() {
    init_metrics();
    let app = TestApp::spawn().await;
    let client = Client::new();

    app.send(&json!({ "recipient": "carol", "message": "ping", "type": "push" }))
        .await;
    for _ in 0..3 {
        client
            .get(format!("{}/health", app.address))
            .send()
            .await
            .expect("Failed to execute request");
    }

    let response = client
        .get(format!("{}/metrics", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());

    let content_type = response
        .headers()
        .get("content-type")
        .expect("Missing content-type header")
        .to_str()
        .expect("Invalid content-type");
    assert!(content_type.starts_with("text/plain"));

    let body = response.text().await.expect("Failed to get response body");
    assert!(body.contains("notification_sent_total"));
    // Emitted by the HTTP middleware through the installed recorder.
    assert!(body.contains("http_requests_total"));
    assert!(body.contains("http_request_duration_seconds"));
}
