//! Clinical entity recognition seam. Ships a lexicon fallback; a remote
//! recognizer service takes over when `NER_ENDPOINT` is configured.

use std::sync::Arc;

use anyhow::Result;
use once_cell::sync::{Lazy, OnceCell};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::Settings;

/// Label set emitted by clinical recognizers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityCategory {
    Problem,
    Treatment,
    Test,
    Procedure,
    Drug,
    Dosage,
}

/// Entity span with byte offsets relative to the source narrative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedEntity {
    pub text: String,
    pub category: EntityCategory,
    pub start: usize,
    pub end: usize,
}

/// Trait for recognizer implementations. "No entities found" is `Ok(vec![])`,
/// never an error.
pub trait Ner: Send + Sync {
    fn extract(&self, text: &str) -> Result<Vec<ExtractedEntity>>;
}

static PROBLEM_TERMS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "hypertension",
        "epistaxis",
        "pneumonia",
        "heart failure",
        "angina pectoris",
        "atrial fibrillation",
        "asthma",
        "influenza",
        "diabetes mellitus",
        "stroke",
        "epilepsy",
        "chronic kidney disease",
        "urinary tract infection",
        "sepsis",
        "anemia",
        "fever",
        "headache",
        "chest pain",
        "shortness of breath",
        "cough",
        "abdominal pain",
        "nausea",
        "vomiting",
        "dizziness",
        "syncope",
        "diarrhea",
        "obesity",
        "overweight",
        "hyperlipidemia",
    ]
});

static TREATMENT_TERMS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "oxygen therapy",
        "intravenous fluids",
        "antibiotic therapy",
        "insulin therapy",
        "blood transfusion",
        "nebulization",
        "dialysis",
    ]
});

static TEST_TERMS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "chest x-ray",
        "electrocardiogram",
        "complete blood count",
        "blood test",
        "blood glucose",
        "blood pressure",
        "urinalysis",
    ]
});

static PROCEDURE_TERMS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "appendectomy",
        "cesarean section",
        "tonsillectomy",
        "endoscopy",
        "intubation",
        "catheterization",
    ]
});

static DRUG_TERMS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "metformin",
        "aspirin",
        "amlodipine",
        "paracetamol",
        "amoxicillin",
        "captopril",
        "omeprazole",
        "salbutamol",
        "furosemide",
        "ceftriaxone",
    ]
});

static DOSAGE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b\d+(?:\.\d+)?\s?(?:mg|mcg|g|ml|iu|units?)\b").expect("valid regex")
});

/// Lexicon recognizer used when no remote service is configured.
pub struct LexiconNer;

impl Ner for LexiconNer {
    fn extract(&self, text: &str) -> Result<Vec<ExtractedEntity>> {
        let mut entities = Vec::new();
        entities.extend(find_terms(text, &PROBLEM_TERMS, EntityCategory::Problem));
        entities.extend(find_terms(text, &TREATMENT_TERMS, EntityCategory::Treatment));
        entities.extend(find_terms(text, &TEST_TERMS, EntityCategory::Test));
        entities.extend(find_terms(text, &PROCEDURE_TERMS, EntityCategory::Procedure));
        entities.extend(find_terms(text, &DRUG_TERMS, EntityCategory::Drug));
        entities.extend(find_dosages(text));
        Ok(entities)
    }
}

fn find_terms(text: &str, terms: &[&str], category: EntityCategory) -> Vec<ExtractedEntity> {
    // ascii lowering keeps byte offsets aligned with the source text
    let lower = text.to_ascii_lowercase();
    let mut entities = Vec::new();
    for term in terms {
        let mut start_pos = 0;
        while let Some(pos) = lower[start_pos..].find(term) {
            let start = start_pos + pos;
            let end = start + term.len();
            entities.push(ExtractedEntity {
                text: text[start..end].to_string(),
                category,
                start,
                end,
            });
            start_pos = end;
        }
    }
    entities
}

fn find_dosages(text: &str) -> Vec<ExtractedEntity> {
    DOSAGE_PATTERN
        .find_iter(text)
        .map(|m| ExtractedEntity {
            text: m.as_str().to_string(),
            category: EntityCategory::Dosage,
            start: m.start(),
            end: m.end(),
        })
        .collect()
}

#[derive(Debug, Serialize)]
struct ExtractRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ExtractResponse {
    entities: Vec<ExtractedEntity>,
}

/// Client for a remote recognizer exposing `POST {endpoint}` with a JSON
/// `{"text": …}` body and an `{"entities": […]}` response.
pub struct HttpNer {
    endpoint: String,
    client: OnceCell<reqwest::blocking::Client>,
}

impl HttpNer {
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            client: OnceCell::new(),
        }
    }

    // Built lazily so construction stays safe inside the async runtime; the
    // blocking client is only ever touched from the blocking pool.
    fn client(&self) -> Result<&reqwest::blocking::Client> {
        self.client.get_or_try_init(|| {
            reqwest::blocking::Client::builder()
                .user_agent("icd-assistant/0.1")
                .build()
                .map_err(Into::into)
        })
    }
}

impl Ner for HttpNer {
    fn extract(&self, text: &str) -> Result<Vec<ExtractedEntity>> {
        let response = self
            .client()?
            .post(&self.endpoint)
            .json(&ExtractRequest { text })
            .send()?
            .error_for_status()?;
        let payload: ExtractResponse = response.json()?;
        Ok(payload.entities)
    }
}

/// Load the configured recognizer implementation.
pub async fn load_model(settings: &Settings) -> Result<Arc<dyn Ner>> {
    match &settings.ner_endpoint {
        Some(endpoint) => {
            info!(%endpoint, "using remote clinical recognizer");
            Ok(Arc::new(HttpNer::new(endpoint.clone())) as Arc<dyn Ner>)
        }
        None => Ok(Arc::new(LexiconNer) as Arc<dyn Ner>),
    }
}
