//! Probe endpoints of tarot-service.

mod common;

use common::TestApp;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn health_check_returns_ok() {
    let generation = MockServer::start().await;
    let app = TestApp::spawn(&generation).await;

    let response = app
        .client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "tarot-service");
}

#[tokio::test]
async fn readiness_check_returns_ok_when_generator_answers() {
    let generation = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "models": [{"name": "mistral:latest"}]
        })))
        .expect(1)
        .mount(&generation)
        .await;

    let app = TestApp::spawn(&generation).await;

    let response = app
        .client
        .get(format!("{}/ready", app.address))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ready");
    assert_eq!(body["provider"], "ollama");
    assert_eq!(body["model"], "mistral");
}

#[tokio::test]
async fn readiness_check_returns_503_when_generator_fails() {
    let generation = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&generation)
        .await;

    let app = TestApp::spawn(&generation).await;

    let response = app
        .client
        .get(format!("{}/ready", app.address))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 503);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "unavailable");
}

#[tokio::test]
async fn metrics_endpoint_exposes_prometheus_text() {
    let generation = MockServer::start().await;
    let app = TestApp::spawn(&generation).await;

    // Generate at least one labelled sample
    app.client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("Failed to send request");

    let response = app
        .client
        .get(format!("{}/metrics", app.address))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("http_requests_total"));
}
