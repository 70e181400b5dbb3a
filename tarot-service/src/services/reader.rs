//! Reading flow: draw cards, ask for an interpretation, translate if needed.

use crate::models::{Card, Language, Question, Reading};
use crate::services::metrics;
use crate::services::prompt::{reading_prompt, translation_prompt};
use crate::services::providers::{GenerationError, TextGenerator};
use crate::services::selector::select_cards;
use std::sync::Arc;
use std::time::Instant;

#[derive(Clone)]
pub struct TarotReader {
    generator: Arc<dyn TextGenerator>,
    card_count: usize,
}

impl TarotReader {
    pub fn new(generator: Arc<dyn TextGenerator>, card_count: usize) -> Self {
        Self {
            generator,
            card_count,
        }
    }

    pub fn generator(&self) -> &Arc<dyn TextGenerator> {
        &self.generator
    }

    /// Produce a full reading. Never fails: generation errors are replaced
    /// by their sentinel text in `prediction`.
    #[tracing::instrument(skip(self, question), fields(lang = %question.lang))]
    pub async fn read(&self, question: &Question) -> Reading {
        let cards = select_cards(&question.text, self.card_count);

        let drawn: Vec<&str> = cards.iter().map(|c| c.name).collect();
        tracing::info!(cards = ?drawn, "Cards drawn");

        // A failed prediction is not worth translating.
        let prediction = match self.predict(&question.text, &cards).await {
            Ok(text) => self.translate_text(&text, question.lang).await,
            Err(e) => Err(e),
        }
        .unwrap_or_else(|e| e.sentinel().to_string());

        metrics::record_reading(question.lang.as_str());

        Reading {
            question: question.text.clone(),
            cards,
            prediction,
            language: question.lang,
        }
    }

    /// Ask the generation service to interpret `cards` for `question`.
    pub async fn predict(
        &self,
        question: &str,
        cards: &[Card],
    ) -> Result<String, GenerationError> {
        self.generate("prediction", &reading_prompt(question, cards))
            .await
    }

    /// Translate `text` into `lang`. The default language is returned
    /// unchanged without a generation call.
    pub async fn translate_text(
        &self,
        text: &str,
        lang: Language,
    ) -> Result<String, GenerationError> {
        match translation_prompt(text, lang) {
            Some(prompt) => self.generate("translation", &prompt).await,
            None => Ok(text.to_string()),
        }
    }

    async fn generate(&self, kind: &str, prompt: &str) -> Result<String, GenerationError> {
        let start = Instant::now();
        let result = self.generator.generate(prompt).await;
        let elapsed = start.elapsed().as_secs_f64();

        let outcome = match &result {
            Ok(_) => "ok",
            Err(e) => {
                tracing::warn!(
                    provider = self.generator.name(),
                    kind,
                    error_kind = e.kind(),
                    error = %e,
                    "Generation call failed"
                );
                e.kind()
            }
        };
        metrics::record_generation(self.generator.name(), kind, outcome, elapsed);

        result
    }
}
