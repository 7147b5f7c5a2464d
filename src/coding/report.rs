//! Per-record results and corpus-level aggregation.

use serde::Serialize;

/// One record's extraction outcome. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordResult {
    pub patient_id: String,
    pub narrative: String,
    pub entities: Vec<String>,
    pub codes: Vec<String>,
    pub reference_diagnosis: String,
    pub matched: bool,
    pub entity_count: usize,
}

impl RecordResult {
    pub fn new(
        patient_id: String,
        narrative: String,
        entities: Vec<String>,
        codes: Vec<String>,
        reference_diagnosis: String,
        matched: bool,
    ) -> Self {
        let entity_count = entities.len();
        Self {
            patient_id,
            narrative,
            entities,
            codes,
            reference_diagnosis,
            matched,
            entity_count,
        }
    }
}

/// Corpus aggregates. Ratios are 0.0 for an empty corpus, never NaN.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusSummary {
    pub total_records: usize,
    pub total_entities: usize,
    pub matched_records: usize,
    pub unmatched_records: usize,
    pub average_entities: f64,
    pub accuracy: f64,
}

/// Full run output: per-record results in input order plus the summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusReport {
    pub results: Vec<RecordResult>,
    pub summary: CorpusSummary,
}

impl CorpusReport {
    /// Aggregate ordered per-record results. Result order equals input order.
    pub fn build(results: Vec<RecordResult>) -> Self {
        let total_records = results.len();
        let total_entities = results.iter().map(|r| r.entity_count).sum();
        let matched_records = results.iter().filter(|r| r.matched).count();
        let unmatched_records = total_records - matched_records;
        let (average_entities, accuracy) = if total_records == 0 {
            (0.0, 0.0)
        } else {
            (
                total_entities as f64 / total_records as f64,
                matched_records as f64 / total_records as f64,
            )
        };
        Self {
            results,
            summary: CorpusSummary {
                total_records,
                total_entities,
                matched_records,
                unmatched_records,
                average_entities,
                accuracy,
            },
        }
    }
}
