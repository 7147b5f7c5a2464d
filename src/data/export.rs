//! Run artefacts: results CSV, parquet copy, and JSON summary envelope.

use std::{fs::File, path::Path};

use anyhow::{Context, Result};
use chrono::Utc;
use polars::prelude::{DataFrame, NamedFrom, ParquetWriter, Series};
use serde::{Deserialize, Serialize};
use serde_with::{formats::CommaSeparator, serde_as, StringWithSeparator};
use tracing::info;

use crate::{
    cli::EvalBasis,
    coding::report::{CorpusReport, RecordResult},
    config::Settings,
};

pub const RESULTS_CSV: &str = "diagnosis_results.csv";
pub const RESULTS_PARQUET: &str = "diagnosis_results.parquet";
pub const SUMMARY_JSON: &str = "extraction_summary.json";

/// One output row, using the hospital export's column names. List columns
/// are rendered as comma-joined text so the table stays flat.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    #[serde(rename = "id_pasien")]
    pub patient_id: String,
    #[serde(rename = "rekam_medis_narasi")]
    pub narrative: String,
    #[serde_as(as = "StringWithSeparator::<CommaSeparator, String>")]
    #[serde(rename = "entities_detected")]
    pub entities: Vec<String>,
    #[serde(rename = "diagnosis_ground_truth")]
    pub reference_diagnosis: String,
    #[serde_as(as = "StringWithSeparator::<CommaSeparator, String>")]
    #[serde(rename = "icd10_codes")]
    pub codes: Vec<String>,
    #[serde(rename = "match_ground_truth")]
    pub matched: bool,
}

impl From<&RecordResult> for ResultRow {
    fn from(value: &RecordResult) -> Self {
        Self {
            patient_id: value.patient_id.clone(),
            narrative: value.narrative.clone(),
            entities: value.entities.iter().map(|e| flatten_item(e)).collect(),
            reference_diagnosis: value.reference_diagnosis.clone(),
            codes: value.codes.iter().map(|c| flatten_item(c)).collect(),
            matched: value.matched,
        }
    }
}

// List items must not contain the list separator, or a re-read would split
// one item into two. Remote recognizers can emit commas inside an entity.
fn flatten_item(item: &str) -> String {
    item.replace(',', ";")
}

/// Write all run artefacts under the configured outputs dir, returning the
/// results CSV path for the caller to report.
pub fn export_all(
    report: &CorpusReport,
    basis: EvalBasis,
    settings: &Settings,
) -> Result<std::path::PathBuf> {
    let rows: Vec<ResultRow> = report.results.iter().map(ResultRow::from).collect();
    let csv_path = settings.join_output(RESULTS_CSV);
    write_results_csv(&rows, &csv_path)?;
    write_results_parquet(&rows, &settings.join_output(RESULTS_PARQUET))?;
    write_summary_json(report, basis, &settings.join_output(SUMMARY_JSON))?;
    Ok(csv_path)
}

pub fn write_results_csv(rows: &[ResultRow], path: &Path) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("create {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    info!(path = %path.display(), rows = rows.len(), "wrote results csv");
    Ok(())
}

pub fn write_results_parquet(rows: &[ResultRow], path: &Path) -> Result<()> {
    if rows.is_empty() {
        return Ok(());
    }
    let ids: Vec<String> = rows.iter().map(|r| r.patient_id.clone()).collect();
    let narratives: Vec<String> = rows.iter().map(|r| r.narrative.clone()).collect();
    let entities: Vec<String> = rows.iter().map(|r| r.entities.join(",")).collect();
    let references: Vec<String> = rows.iter().map(|r| r.reference_diagnosis.clone()).collect();
    let codes: Vec<String> = rows.iter().map(|r| r.codes.join(",")).collect();
    let matched: Vec<bool> = rows.iter().map(|r| r.matched).collect();
    let mut df = DataFrame::new(vec![
        Series::new("id_pasien".into(), ids),
        Series::new("rekam_medis_narasi".into(), narratives),
        Series::new("entities_detected".into(), entities),
        Series::new("diagnosis_ground_truth".into(), references),
        Series::new("icd10_codes".into(), codes),
        Series::new("match_ground_truth".into(), matched),
    ])?;
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    ParquetWriter::new(file).finish(&mut df)?;
    info!(path = %path.display(), rows = rows.len(), "wrote results parquet");
    Ok(())
}

pub fn write_summary_json(report: &CorpusReport, basis: EvalBasis, path: &Path) -> Result<()> {
    let envelope = serde_json::json!({
        "generated_at": Utc::now().to_rfc3339(),
        "eval_basis": basis.as_str(),
        "summary": report.summary,
    });
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    serde_json::to_writer_pretty(file, &envelope)?;
    info!(path = %path.display(), "wrote extraction summary");
    Ok(())
}
