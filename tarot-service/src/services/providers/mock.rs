//! In-process generator for local runs without Ollama, and for tests.

use super::{GenerationError, TextGenerator};
use async_trait::async_trait;
use std::sync::Mutex;

/// Mock text generator. Echoes the prompt and records every call.
pub struct MockTextGenerator {
    /// Number of calls that succeed before every further call fails.
    /// `None` means always succeed.
    successes: Option<usize>,
    prompts: Mutex<Vec<String>>,
}

impl MockTextGenerator {
    pub fn new() -> Self {
        Self {
            successes: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// A generator whose every call fails with a 503.
    pub fn failing() -> Self {
        Self::failing_after(0)
    }

    /// A generator that answers `successes` calls, then fails.
    pub fn failing_after(successes: usize) -> Self {
        Self {
            successes: Some(successes),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

impl Default for MockTextGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let call = {
            let mut prompts = self
                .prompts
                .lock()
                .map_err(|e| GenerationError::Network(e.to_string()))?;
            prompts.push(prompt.to_string());
            prompts.len()
        };

        match self.successes {
            Some(limit) if call > limit => Err(GenerationError::Status {
                status: 503,
                body: "mock generator unavailable".to_string(),
            }),
            _ => Ok(format!("Mock response for: {}", prompt)),
        }
    }

    async fn health_check(&self) -> Result<(), GenerationError> {
        match self.successes {
            Some(0) => Err(GenerationError::Status {
                status: 503,
                body: "mock generator unavailable".to_string(),
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn echoes_prompt_and_records_it() {
        let generator = MockTextGenerator::new();
        let text = generator.generate("hello").await.unwrap();

        assert_eq!(text, "Mock response for: hello");
        assert_eq!(generator.prompts(), vec!["hello".to_string()]);
    }

    #[tokio::test]
    async fn failing_after_allows_limited_calls() {
        let generator = MockTextGenerator::failing_after(1);

        assert!(generator.generate("first").await.is_ok());
        assert!(matches!(
            generator.generate("second").await,
            Err(GenerationError::Status { status: 503, .. })
        ));
        assert_eq!(generator.prompts().len(), 2);
    }

    #[tokio::test]
    async fn failing_generator_is_unhealthy() {
        assert!(MockTextGenerator::failing().health_check().await.is_err());
        assert!(MockTextGenerator::new().health_check().await.is_ok());
    }
}
