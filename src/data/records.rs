//! Patient record ingestion from hospital CSV exports.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

/// Columns a records export must carry.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "id_pasien",
    "nm_pasien",
    "jk",
    "umur_pasien",
    "id_kunjungan",
    "tgl_registrasi",
    "nm_dokter",
    "rekam_medis_narasi",
    "diagnosis_structured",
];

/// Failures while loading records; always fatal before the run starts.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read records from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("input is missing required columns: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },
}

/// One patient visit. Immutable once loaded; the pipeline reads it only.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientRecord {
    pub patient_id: String,
    pub name: String,
    pub sex: String,
    pub age: u32,
    pub visit_id: String,
    pub visit_date: Option<NaiveDate>,
    pub clinician: String,
    pub narrative: String,
    pub reference_diagnosis: String,
}

#[derive(Debug, Deserialize)]
struct RawRecordRow {
    #[serde(rename = "id_pasien")]
    patient_id: String,
    #[serde(rename = "nm_pasien")]
    name: String,
    #[serde(rename = "jk")]
    sex: String,
    #[serde(rename = "umur_pasien")]
    age: Option<u32>,
    #[serde(rename = "id_kunjungan")]
    visit_id: String,
    #[serde(rename = "tgl_registrasi", default)]
    visit_date: String,
    #[serde(rename = "nm_dokter")]
    clinician: String,
    #[serde(rename = "rekam_medis_narasi", default)]
    narrative: String,
    #[serde(rename = "diagnosis_structured", default)]
    reference_diagnosis: String,
}

impl RawRecordRow {
    fn into_record(self) -> PatientRecord {
        let visit_date = parse_visit_date(&self.patient_id, &self.visit_date);
        PatientRecord {
            patient_id: self.patient_id,
            name: self.name,
            sex: self.sex,
            age: self.age.unwrap_or(0),
            visit_id: self.visit_id,
            visit_date,
            clinician: self.clinician,
            narrative: self.narrative,
            reference_diagnosis: self.reference_diagnosis,
        }
    }
}

// Hospital exports are inconsistent about the registration timestamp; an
// unparseable value drops the date, never the record.
fn parse_visit_date(patient_id: &str, raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(datetime.date());
    }
    for format in ["%Y-%m-%d", "%d/%m/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date);
        }
    }
    warn!(%patient_id, %value, "unparseable tgl_registrasi; keeping record without visit date");
    None
}

/// Check the header row against [`REQUIRED_COLUMNS`] without loading rows.
pub fn validate_columns(path: &Path) -> Result<(), IngestError> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| IngestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let headers = reader.headers().map_err(|source| IngestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !headers.iter().any(|h| h == **required))
        .map(|required| required.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(IngestError::MissingColumns { missing })
    }
}

/// Load the full ordered corpus. Column validation happens first, so a
/// malformed schema aborts before any record is processed. Zero data rows is
/// a valid empty corpus.
pub fn load_records(path: &Path) -> Result<Vec<PatientRecord>, IngestError> {
    validate_columns(path)?;
    let read_err = |source| IngestError::Read {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::Reader::from_path(path).map_err(read_err)?;
    let mut records = Vec::new();
    for result in reader.deserialize::<RawRecordRow>() {
        let row = result.map_err(read_err)?;
        records.push(row.into_record());
    }
    info!(path = %path.display(), records = records.len(), "loaded patient records");
    Ok(records)
}
