//! Shared DTOs for JSON responses.

use serde::Serialize;

use crate::data::export::ResultRow;

#[derive(Debug, Clone, Serialize)]
pub struct ResultDto {
    pub patient_id: String,
    pub narrative: String,
    pub entities: Vec<String>,
    pub reference_diagnosis: String,
    pub codes: Vec<String>,
    pub matched: bool,
}

impl From<ResultRow> for ResultDto {
    fn from(value: ResultRow) -> Self {
        Self {
            patient_id: value.patient_id,
            narrative: value.narrative,
            entities: value.entities,
            reference_diagnosis: value.reference_diagnosis,
            codes: value.codes,
            matched: value.matched,
        }
    }
}
