//! Router tests that run in-process with the mock generator.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tarot_service::services::{get_metrics, init_metrics, MockTextGenerator, TarotReader};
use tarot_service::startup::{build_router, AppState};
use tower::util::ServiceExt;

fn app_with(generator: Arc<MockTextGenerator>) -> axum::Router {
    let config = common::test_config("http://127.0.0.1:1");
    let reader = TarotReader::new(generator, config.reading.card_count);
    build_router(AppState { config, reader })
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn tarot_route_reads_with_mock_generator() {
    let generator = Arc::new(MockTextGenerator::new());
    let app = app_with(generator.clone());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/tarot")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"text":"hello world","lang":"ru"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");

    let body = body_json(response).await;
    assert_eq!(body["language"], "ru");
    assert_eq!(body["cards"][0]["name"], "The Hierophant");
    assert!(body["prediction"]
        .as_str()
        .unwrap()
        .starts_with("Mock response for: Translate the following text to Russian"));
    assert_eq!(generator.prompts().len(), 2);
}

#[tokio::test]
async fn tarot_route_rejects_non_json_body() {
    let app = app_with(Arc::new(MockTextGenerator::new()));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/tarot")
                .header("content-type", "application/json")
                .body(Body::from("not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn ready_route_reflects_generator_health() {
    let app = app_with(Arc::new(MockTextGenerator::failing()));

    let response = app
        .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn unknown_route_is_404() {
    let app = app_with(Arc::new(MockTextGenerator::new()));

    let response = app
        .oneshot(Request::builder().uri("/cards").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_paths_share_one_metrics_series() {
    init_metrics();
    let app = app_with(Arc::new(MockTextGenerator::new()));

    for uri in ["/junk-a", "/junk-b", "/health"] {
        app.clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
    }

    let exported = get_metrics();
    let series: Vec<&str> = exported
        .lines()
        .filter(|line| line.starts_with("http_requests_total{"))
        .collect();

    assert!(series.iter().all(|line| !line.contains("/junk-")));
    let unmatched = series
        .iter()
        .filter(|line| {
            line.contains(r#"method="GET""#)
                && line.contains(r#"path="unmatched""#)
                && line.contains(r#"status="404""#)
        })
        .count();
    assert_eq!(unmatched, 1);
    assert!(series.iter().any(|line| line.contains(r#"path="/health""#)));
}
