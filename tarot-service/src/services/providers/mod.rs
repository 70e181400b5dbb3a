//! Text generation provider abstraction.
//!
//! The reading flow only needs "prompt in, text out"; the trait keeps the
//! HTTP backend swappable with the in-process mock.

pub mod mock;
pub mod ollama;

use async_trait::async_trait;
use thiserror::Error;

/// Prediction text used when the generation service could not be reached or
/// answered with an error.
pub const SERVICE_ERROR_TEXT: &str = "Error communicating with Ollama.";

/// Prediction text used when the service answered but returned no text.
pub const NO_RESPONSE_TEXT: &str = "No response from Mistral.";

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Generation service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Generation service returned no text")]
    EmptyResponse,
}

impl GenerationError {
    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::Network(_) => "network",
            GenerationError::Status { .. } => "status",
            GenerationError::Decode(_) => "decode",
            GenerationError::EmptyResponse => "empty_response",
        }
    }

    /// Fixed text that replaces the prediction in the response body.
    pub fn sentinel(&self) -> &'static str {
        match self {
            GenerationError::EmptyResponse => NO_RESPONSE_TEXT,
            _ => SERVICE_ERROR_TEXT,
        }
    }
}

/// Trait for text generation backends (e.g., Ollama).
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Backend name, used as a metrics label.
    fn name(&self) -> &'static str;

    /// Generate a complete (non-streaming) response for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;

    /// Health check.
    async fn health_check(&self) -> Result<(), GenerationError>;
}
