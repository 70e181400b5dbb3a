//! Prometheus metrics for tarot-service.
//!
//! HTTP traffic plus reading and generation-service metrics.

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::{Once, OnceLock};
use std::time::Instant;

/// Path label for requests that matched no route.
pub const UNMATCHED_PATH: &str = "unmatched";

// Global registry
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

// HTTP metrics
pub static HTTP_REQUESTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static HTTP_REQUEST_DURATION_SECONDS: OnceLock<HistogramVec> = OnceLock::new();

// Reading metrics
pub static TAROT_READINGS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static GENERATION_REQUESTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static GENERATION_LATENCY_SECONDS: OnceLock<HistogramVec> = OnceLock::new();

static INIT: Once = Once::new();

/// Initialize all metrics. Later calls are no-ops.
pub fn init_metrics() {
    INIT.call_once(register_metrics);
}

fn register_metrics() {
    let registry = Registry::new();

    let http_requests_total = IntCounterVec::new(
        Opts::new("http_requests_total", "Total number of HTTP requests"),
        &["method", "path", "status"],
    )
    .expect("Failed to create http_requests_total metric");

    let http_request_duration = HistogramVec::new(
        HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 10.0, 30.0, 60.0, 120.0]),
        &["method", "path"],
    )
    .expect("Failed to create http_request_duration_seconds metric");

    let readings_total = IntCounterVec::new(
        Opts::new("tarot_readings_total", "Total tarot readings served"),
        &["language"],
    )
    .expect("Failed to create tarot_readings_total metric");

    // kind: prediction, translation; outcome: ok or the error kind
    let generation_requests = IntCounterVec::new(
        Opts::new(
            "generation_requests_total",
            "Total calls to the generation service",
        ),
        &["provider", "kind", "outcome"],
    )
    .expect("Failed to create generation_requests_total metric");

    let generation_latency = HistogramVec::new(
        HistogramOpts::new(
            "generation_latency_seconds",
            "Generation service latency in seconds",
        )
        .buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0, 120.0]),
        &["provider", "kind"],
    )
    .expect("Failed to create generation_latency_seconds metric");

    registry
        .register(Box::new(http_requests_total.clone()))
        .expect("Failed to register http_requests_total");
    registry
        .register(Box::new(http_request_duration.clone()))
        .expect("Failed to register http_request_duration_seconds");
    registry
        .register(Box::new(readings_total.clone()))
        .expect("Failed to register tarot_readings_total");
    registry
        .register(Box::new(generation_requests.clone()))
        .expect("Failed to register generation_requests_total");
    registry
        .register(Box::new(generation_latency.clone()))
        .expect("Failed to register generation_latency_seconds");

    // Initialize globals
    let _ = REGISTRY.set(registry);
    let _ = HTTP_REQUESTS_TOTAL.set(http_requests_total);
    let _ = HTTP_REQUEST_DURATION_SECONDS.set(http_request_duration);
    let _ = TAROT_READINGS_TOTAL.set(readings_total);
    let _ = GENERATION_REQUESTS_TOTAL.set(generation_requests);
    let _ = GENERATION_LATENCY_SECONDS.set(generation_latency);

    tracing::info!("Prometheus metrics initialized");
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();

    let registry = match REGISTRY.get() {
        Some(r) => r,
        None => {
            tracing::error!("Metrics registry not initialized");
            return "# Metrics registry not initialized\n".to_string();
        }
    };

    let metric_families = registry.gather();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return format!("# Failed to encode metrics: {}\n", e);
    }

    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Failed to convert metrics to UTF-8");
            format!("# Failed to convert metrics to UTF-8: {}\n", e)
        }
    }
}

/// Axum middleware recording request count and latency.
///
/// The path label is the route template, so raw URLs never create series.
pub async fn http_metrics_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_PATH.to_string());

    let response = next.run(req).await;

    let status = response.status().as_u16().to_string();
    if let Some(counter) = HTTP_REQUESTS_TOTAL.get() {
        counter
            .with_label_values(&[method.as_str(), path.as_str(), status.as_str()])
            .inc();
    }
    if let Some(histogram) = HTTP_REQUEST_DURATION_SECONDS.get() {
        histogram
            .with_label_values(&[method.as_str(), path.as_str()])
            .observe(start.elapsed().as_secs_f64());
    }

    response
}

/// Record a served reading.
pub fn record_reading(language: &str) {
    if let Some(counter) = TAROT_READINGS_TOTAL.get() {
        counter.with_label_values(&[language]).inc();
    }
}

/// Record one call to the generation service.
pub fn record_generation(provider: &str, kind: &str, outcome: &str, duration_secs: f64) {
    if let Some(counter) = GENERATION_REQUESTS_TOTAL.get() {
        counter.with_label_values(&[provider, kind, outcome]).inc();
    }
    if let Some(histogram) = GENERATION_LATENCY_SECONDS.get() {
        histogram
            .with_label_values(&[provider, kind])
            .observe(duration_secs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorded_reading_shows_up_in_export() {
        init_metrics();
        record_reading("ru");
        record_generation("mock", "prediction", "ok", 0.2);

        let exported = get_metrics();
        assert!(exported.contains("tarot_readings_total{language=\"ru\"}"));
        assert!(exported.contains("generation_requests_total"));
    }
}
