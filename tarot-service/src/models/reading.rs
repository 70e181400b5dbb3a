use super::Card;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Language the prediction is returned in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ru,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ru => "ru",
        }
    }

    /// Human-readable name used inside translation prompts.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Ru => "Russian",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /tarot`.
#[derive(Debug, Clone, Deserialize)]
pub struct Question {
    pub text: String,
    #[serde(default)]
    pub lang: Language,
}

/// Response of `POST /tarot`.
#[derive(Debug, Clone, Serialize)]
pub struct Reading {
    pub question: String,
    pub cards: Vec<Card>,
    pub prediction: String,
    pub language: Language,
}
