//! Deterministic card selection.
//!
//! The SHA-256 digest of the question is the only source of randomness, so
//! the same text always draws the same cards.

use crate::models::{Card, CATALOG};
use sha2::{Digest, Sha256};

/// Derive up to `count` distinct indices into a deck of `deck_size` cards.
///
/// The first `count` digest bytes are reduced modulo `deck_size` and
/// deduplicated in first-seen order. Collisions shrink the result; no
/// replacement indices are drawn.
pub fn select_indices(text: &str, count: usize, deck_size: usize) -> Vec<usize> {
    if deck_size == 0 {
        return Vec::new();
    }

    let digest = Sha256::digest(text.as_bytes());
    let mut indices = Vec::with_capacity(count.min(deck_size));

    for byte in digest.iter().take(count) {
        let index = usize::from(*byte) % deck_size;
        if !indices.contains(&index) {
            indices.push(index);
        }
    }

    indices
}

/// Draw cards from [`CATALOG`] for `text`.
pub fn select_cards(text: &str, count: usize) -> Vec<Card> {
    select_indices(text, count, CATALOG.len())
        .into_iter()
        .map(|i| CATALOG[i])
        .collect()
}
