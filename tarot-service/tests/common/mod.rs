#![allow(dead_code)]

use service_core::config::Config as CoreConfig;
use tarot_service::config::{
    GenerationConfig, ObservabilityConfig, ProviderKind, ReadingConfig, TarotConfig,
};
use tarot_service::startup::Application;
use wiremock::MockServer;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: reqwest::Client,
}

/// Config pointing at `generation_url` with a random listener port.
pub fn test_config(generation_url: &str) -> TarotConfig {
    TarotConfig {
        common: CoreConfig {
            port: 0,
            log_level: "info".to_string(),
        },
        generation: GenerationConfig {
            provider: ProviderKind::Ollama,
            url: generation_url.to_string(),
            model: "mistral".to_string(),
            timeout_secs: Some(5),
        },
        reading: ReadingConfig { card_count: 3 },
        observability: ObservabilityConfig {
            otlp_endpoint: None,
        },
    }
}

impl TestApp {
    /// Spawn the service against a mock generation server.
    pub async fn spawn(generation: &MockServer) -> Self {
        Self::spawn_with_config(test_config(&generation.uri())).await
    }

    pub async fn spawn_with_config(config: TarotConfig) -> Self {
        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to accept connections
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(20)).await;
        }

        TestApp {
            address,
            port,
            client,
        }
    }

    pub async fn post_tarot(&self, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}/tarot", self.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to send request")
    }
}
