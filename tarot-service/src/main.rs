use service_core::observability::init_tracing;
use tarot_service::config::TarotConfig;
use tarot_service::startup::Application;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = TarotConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        "tarot-service",
        &config.common.log_level,
        config.observability.otlp_endpoint.as_deref(),
    );

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        anyhow::anyhow!("Startup error: {}", e)
    })?;

    tracing::info!("Starting tarot-service on port {}", app.port());
    app.run_until_stopped().await?;

    Ok(())
}
