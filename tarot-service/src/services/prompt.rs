//! Prompt templates sent to the generation service.

use crate::models::{Card, Language};

/// Instruction asking the model to interpret the drawn cards.
pub fn reading_prompt(question: &str, cards: &[Card]) -> String {
    let drawn = cards
        .iter()
        .map(|card| format!("{} ({})", card.name, card.meaning))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "You are a tarot reader. A user asked: '{question}'.\n\
         The following tarot cards were drawn:\n\
         {drawn}.\n\
         Provide a detailed mystical and intuitive interpretation of this reading.\n"
    )
}

/// Instruction translating `text` into `target`.
///
/// Returns `None` for the default language: predictions are generated in
/// English and need no second call.
pub fn translation_prompt(text: &str, target: Language) -> Option<String> {
    if target == Language::default() {
        return None;
    }

    Some(format!(
        "Translate the following text to {}:\n\n{}",
        target.display_name(),
        text
    ))
}
