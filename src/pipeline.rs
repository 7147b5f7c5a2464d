//! Corpus pipeline: ingested corpus → extracted entities → final report.
//!
//! Records have no cross-record data dependency, so extraction runs
//! concurrently and results are re-ordered by input index at the end. One bad
//! record never invalidates the batch.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tokio::task;
use tracing::{debug, warn};

use crate::{
    coding::{
        dictionary::CodeDictionary,
        evaluate::{self, EvalOptions},
        mapper,
        report::{CorpusReport, RecordResult},
    },
    data::records::PatientRecord,
    nlp::{ner::Ner, normalize},
};

/// Corpus as loaded, before entity extraction.
#[derive(Debug)]
pub struct IngestedCorpus {
    records: Vec<PatientRecord>,
}

#[derive(Debug)]
struct ExtractedRecord {
    record: PatientRecord,
    entities: Vec<String>,
}

/// Corpus after entity extraction, before coding and evaluation.
#[derive(Debug)]
pub struct ExtractedCorpus {
    rows: Vec<ExtractedRecord>,
}

impl IngestedCorpus {
    pub fn new(records: Vec<PatientRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Run the recognizer once per record through a bounded concurrency
    /// window, collecting results back in input order. A recognizer error or
    /// panic, or an empty narrative, degrades that record to zero entities.
    pub async fn extract(self, recognizer: Arc<dyn Ner>, concurrency: usize) -> ExtractedCorpus {
        let window = concurrency.max(1);
        let mut rows: Vec<(usize, ExtractedRecord)> =
            stream::iter(self.records.into_iter().enumerate())
                .map(|(index, record)| {
                    let recognizer = Arc::clone(&recognizer);
                    async move {
                        let entities = extract_one(&record, recognizer).await;
                        (index, ExtractedRecord { record, entities })
                    }
                })
                .buffer_unordered(window)
                .collect()
                .await;
        rows.sort_by_key(|(index, _)| *index);
        ExtractedCorpus {
            rows: rows.into_iter().map(|(_, row)| row).collect(),
        }
    }
}

async fn extract_one(record: &PatientRecord, recognizer: Arc<dyn Ner>) -> Vec<String> {
    if record.narrative.trim().is_empty() {
        warn!(patient_id = %record.patient_id, "empty narrative; record degrades to zero entities");
        return Vec::new();
    }
    let narrative = record.narrative.clone();
    // The recognizer call is synchronous and potentially slow; it runs on the
    // blocking pool so a hang occupies one thread, not the whole run.
    match task::spawn_blocking(move || recognizer.extract(&narrative)).await {
        Ok(Ok(entities)) => normalize::normalize_entities(&entities),
        Ok(Err(err)) => {
            warn!(patient_id = %record.patient_id, %err, "recognizer failed; record degrades to zero entities");
            Vec::new()
        }
        Err(err) => {
            warn!(patient_id = %record.patient_id, %err, "recognizer panicked; record degrades to zero entities");
            Vec::new()
        }
    }
}

impl ExtractedCorpus {
    /// Map codes, evaluate against the reference diagnosis, and aggregate.
    /// Result order equals input order.
    pub fn report(self, dictionary: &CodeDictionary, options: EvalOptions) -> CorpusReport {
        let results = self
            .rows
            .into_iter()
            .map(|row| {
                let codes = mapper::map_entities(&row.entities, dictionary);
                let matched = evaluate::is_match(
                    &row.entities,
                    &codes,
                    &row.record.reference_diagnosis,
                    options,
                );
                debug!(
                    patient_id = %row.record.patient_id,
                    entities = row.entities.len(),
                    codes = codes.len(),
                    matched,
                    "record processed"
                );
                RecordResult::new(
                    row.record.patient_id,
                    row.record.narrative,
                    row.entities,
                    codes,
                    row.record.reference_diagnosis,
                    matched,
                )
            })
            .collect();
        CorpusReport::build(results)
    }
}
