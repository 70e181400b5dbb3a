//! Ollama provider implementation.
//!
//! Calls `POST /api/generate` with streaming disabled and reads the
//! `response` field of the single JSON reply.

use super::{GenerationError, TextGenerator};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use service_core::observability::TracedClientExt;
use std::time::Duration;

/// Ollama provider configuration.
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    /// Base URL without path, e.g. `http://localhost:11434`.
    pub base_url: String,
    pub model: String,
    /// `None` keeps reqwest's default (no timeout).
    pub timeout: Option<Duration>,
}

pub struct OllamaClient {
    config: OllamaConfig,
    client: Client,
}

impl OllamaClient {
    pub fn new(config: OllamaConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { config, client })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api/{}", self.config.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    fn name(&self) -> &'static str {
        "ollama"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let request = GenerateRequest {
            model: &self.config.model,
            prompt,
            stream: false,
        };

        tracing::debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Sending request to generation service"
        );

        let response = self
            .client
            .traced_post(&self.api_url("generate"))
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Decode(e.to_string()))?;

        body.response.ok_or(GenerationError::EmptyResponse)
    }

    async fn health_check(&self) -> Result<(), GenerationError> {
        let response = self
            .client
            .traced_get(&self.api_url("tags"))
            .send()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(GenerationError::Status {
                status: response.status().as_u16(),
                body: String::new(),
            })
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: Option<String>,
}
