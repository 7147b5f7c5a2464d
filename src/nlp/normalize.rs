//! Entity text normalisation applied to recognizer output.

use indexmap::IndexSet;

use crate::nlp::ner::ExtractedEntity;

/// Trim, lowercase, and collapse internal whitespace runs to single spaces.
/// Idempotent.
pub fn normalize_term(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Normalise one record's recognizer output into unique normalized strings
/// in first-seen order. Empty or whitespace-only entity text is dropped.
pub fn normalize_entities(entities: &[ExtractedEntity]) -> Vec<String> {
    let mut seen = IndexSet::new();
    for entity in entities {
        let term = normalize_term(&entity.text);
        if term.is_empty() {
            continue;
        }
        seen.insert(term);
    }
    seen.into_iter().collect()
}
