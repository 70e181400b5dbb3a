//! Application startup and lifecycle management.

use crate::config::{GenerationConfig, ProviderKind, TarotConfig};
use crate::handlers::{get_tarot_reading, health_check, metrics_endpoint, readiness_check};
use crate::services::metrics::http_metrics_middleware;
use crate::services::{
    init_metrics, MockTextGenerator, OllamaClient, OllamaConfig, TarotReader, TextGenerator,
};
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    request_id_middleware, security_headers_middleware, REQUEST_ID_HEADER,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: TarotConfig,
    pub reader: TarotReader,
}

/// Build the configured generation backend.
pub fn build_generator(config: &GenerationConfig) -> Result<Arc<dyn TextGenerator>, AppError> {
    match config.provider {
        ProviderKind::Ollama => {
            let client = OllamaClient::new(OllamaConfig {
                base_url: config.url.clone(),
                model: config.model.clone(),
                timeout: config.timeout(),
            })
            .map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!("Failed to build HTTP client: {}", e))
            })?;

            tracing::info!(
                url = %config.url,
                model = %config.model,
                "Initialized Ollama text generator"
            );
            Ok(Arc::new(client))
        }
        ProviderKind::Mock => {
            tracing::warn!("Using mock text generator; predictions are placeholders");
            Ok(Arc::new(MockTextGenerator::new()))
        }
    }
}

/// Router with every route and middleware layer.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/tarot", post(get_tarot_reading))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics_endpoint))
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(http_metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        // Any origin, method and header.
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the configured generation backend.
    pub async fn build(config: TarotConfig) -> Result<Self, AppError> {
        let generator = build_generator(&config.generation)?;
        Self::build_with_generator(config, generator).await
    }

    /// Build the application around an existing generator.
    pub async fn build_with_generator(
        config: TarotConfig,
        generator: Arc<dyn TextGenerator>,
    ) -> Result<Self, AppError> {
        init_metrics();

        let reader = TarotReader::new(generator, config.reading.card_count);
        let state = AppState {
            config: config.clone(),
            reader,
        };

        // Port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            port,
            card_count = config.reading.card_count,
            "Tarot service listening"
        );

        Ok(Self {
            port,
            listener,
            router: build_router(state),
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
