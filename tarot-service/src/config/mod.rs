use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Default number of cards drawn per reading.
const DEFAULT_CARD_COUNT: usize = 3;

#[derive(Debug, Clone, Deserialize)]
pub struct TarotConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub generation: GenerationConfig,
    pub reading: ReadingConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    pub provider: ProviderKind,
    /// Base URL of the generation service, e.g. `http://localhost:11434`.
    pub url: String,
    pub model: String,
    /// Per-call timeout. Unset means the HTTP client default.
    pub timeout_secs: Option<u64>,
}

impl GenerationConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Ollama,
    Mock,
}

impl FromStr for ProviderKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ollama" => Ok(ProviderKind::Ollama),
            "mock" => Ok(ProviderKind::Mock),
            other => Err(AppError::ConfigError(anyhow::anyhow!(
                "Unknown generation provider '{}', expected 'ollama' or 'mock'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReadingConfig {
    pub card_count: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    /// OTLP collector for span export; logs only when unset.
    pub otlp_endpoint: Option<String>,
}

impl TarotConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(TarotConfig {
            common: common_config,
            generation: GenerationConfig {
                provider: env_or("GENERATION_PROVIDER", "ollama").parse()?,
                url: get_env("GENERATION_URL", Some("http://localhost:11434"), is_prod)?,
                model: get_env("GENERATION_MODEL", Some("mistral"), is_prod)?,
                timeout_secs: parse_optional("GENERATION_TIMEOUT_SECS")?,
            },
            reading: ReadingConfig {
                card_count: parse_or("TAROT_CARD_COUNT", DEFAULT_CARD_COUNT)?,
            },
            observability: ObservabilityConfig {
                otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|v| !v.is_empty()),
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_or<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    Ok(parse_optional(key)?.unwrap_or(default))
}

fn parse_optional<T>(key: &str) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw.trim().parse().map(Some).map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!("{} has invalid value '{}': {}", key, raw, e))
        }),
        _ => Ok(None),
    }
}
