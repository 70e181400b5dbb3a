use axum::{extract::State, Json};

use crate::models::{Question, Reading};
use crate::startup::AppState;

/// `POST /tarot`: draw cards for the question and interpret them.
///
/// Always answers 200 once the body deserializes; generation failures are
/// reported inside `prediction`.
#[tracing::instrument(
    skip(state, question),
    fields(lang = %question.lang, text_len = question.text.len())
)]
pub async fn get_tarot_reading(
    State(state): State<AppState>,
    Json(question): Json<Question>,
) -> Json<Reading> {
    let reading = state.reader.read(&question).await;

    tracing::info!(cards = reading.cards.len(), "Reading served");

    Json(reading)
}
