//! Per-record mapping of normalized entities to ICD-10 codes.

use crate::coding::dictionary::CodeDictionary;

/// Union of codes across all of a record's entities. The outer loop follows
/// entity order, the inner loop dictionary insertion order; a code is kept at
/// its first occurrence. No match yields an empty list, not an error.
pub fn map_entities(entities: &[String], dictionary: &CodeDictionary) -> Vec<String> {
    let mut codes: Vec<String> = Vec::new();
    for entity in entities {
        for code in dictionary.matching_codes(entity) {
            if !codes.iter().any(|c| c == code) {
                codes.push(code.to_string());
            }
        }
    }
    codes
}
