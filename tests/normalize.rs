use icd_assistant::nlp::{
    ner::{EntityCategory, ExtractedEntity},
    normalize::{normalize_entities, normalize_term},
};
use proptest::prelude::*;

fn entity(text: &str) -> ExtractedEntity {
    ExtractedEntity {
        text: text.to_string(),
        category: EntityCategory::Problem,
        start: 0,
        end: text.len(),
    }
}

#[test]
fn trims_lowercases_and_collapses_whitespace() {
    assert_eq!(normalize_term("  Epistaxis \t  Posterior "), "epistaxis posterior");
}

#[test]
fn dedupe_keeps_first_seen_order() {
    let entities = vec![
        entity("Hypertension"),
        entity("Epistaxis"),
        entity("  hypertension "),
    ];
    assert_eq!(
        normalize_entities(&entities),
        vec!["hypertension", "epistaxis"]
    );
}

#[test]
fn blank_entities_are_dropped_silently() {
    let entities = vec![entity("   "), entity("")];
    assert!(normalize_entities(&entities).is_empty());
}

proptest! {
    #[test]
    fn normalization_is_idempotent(raw in ".*") {
        let once = normalize_term(&raw);
        let twice = normalize_term(&once);
        prop_assert_eq!(once, twice);
    }
}
