//! Static clinical term → ICD-10 code table with configurable lookup.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::{cli::MatchMode, nlp::normalize::normalize_term};

/// Built-in term → ICD-10 mapping used when no dictionary CSV is supplied.
const ICD10_SEED_MAP: &[(&str, &str)] = &[
    // common conditions
    ("hypertension", "I10"),
    ("essential (primary) hypertension", "I10"),
    ("secondary hypertension", "I15"),
    ("hypertensive heart disease", "I11"),
    ("hypertensive chronic kidney disease", "I12"),
    ("hypertensive heart and chronic kidney disease", "I13"),
    ("hypertensive crisis", "I16"),
    // heart diseases
    ("heart failure", "I50"),
    ("acute myocardial infarction", "I21"),
    ("chronic ischemic heart disease", "I25"),
    ("angina pectoris", "I20"),
    ("atrial fibrillation", "I48"),
    ("cardiac arrhythmia", "I49"),
    // respiratory conditions
    ("pneumonia", "J18.9"),
    ("community-acquired pneumonia", "J18.9"),
    ("chronic obstructive pulmonary disease", "J44"),
    ("asthma", "J45"),
    ("acute bronchitis", "J20.9"),
    ("influenza", "J11.1"),
    // endocrine disorders
    ("type 1 diabetes mellitus", "E10"),
    ("type 2 diabetes mellitus", "E11"),
    ("diabetes mellitus", "E14"),
    ("diabetes with neurological complications", "E10.4"),
    ("diabetes with renal complications", "E10.2"),
    ("diabetes with ophthalmic complications", "E10.3"),
    ("thyroid disorder", "E07.9"),
    // neurological conditions
    ("stroke", "I63"),
    ("cerebral infarction", "I63"),
    ("hemorrhagic stroke", "I61"),
    ("transient ischemic attack", "G45.9"),
    ("epilepsy", "G40"),
    ("dementia", "F03"),
    ("alzheimer disease", "G30.9"),
    // kidney disorders
    ("chronic kidney disease", "N18"),
    ("acute kidney failure", "N17"),
    ("kidney failure", "N19"),
    ("nephritis", "N05"),
    // mental health
    ("major depressive disorder", "F33"),
    ("depression", "F33"),
    ("anxiety disorder", "F41.9"),
    ("generalized anxiety disorder", "F41.1"),
    ("schizophrenia", "F20"),
    // musculoskeletal
    ("osteoarthritis", "M19.9"),
    ("rheumatoid arthritis", "M06.9"),
    ("back pain", "M54.5"),
    ("neck pain", "M54.2"),
    // digestive system
    ("gastroesophageal reflux disease", "K21.9"),
    ("peptic ulcer", "K27.9"),
    ("gastritis", "K29.7"),
    ("cirrhosis", "K74.6"),
    // infections
    ("sepsis", "A41.9"),
    ("urinary tract infection", "N39.0"),
    ("cellulitis", "L03.9"),
    ("osteomyelitis", "M86.9"),
    // cancer
    ("lung cancer", "C34.9"),
    ("breast cancer", "C50.9"),
    ("colon cancer", "C18.9"),
    ("prostate cancer", "C61"),
    ("skin cancer", "C44.9"),
    // symptoms and signs
    ("fever", "R50.9"),
    ("headache", "R51"),
    ("chest pain", "R06.02"),
    ("shortness of breath", "R06.02"),
    ("cough", "R05"),
    ("abdominal pain", "R10.13"),
    ("fatigue", "R53.83"),
    ("nausea", "R11.0"),
    ("vomiting", "R11.10"),
    // procedures and tests
    ("electrocardiogram", "Z51.89"),
    ("chest x-ray", "Z03.89"),
    ("blood test", "Z03.89"),
    // other common terms
    ("epistaxis", "R04.0"),
    ("syncope", "R55"),
    ("dizziness", "R42"),
    ("insomnia", "G47.00"),
    ("constipation", "K59.00"),
    ("diarrhea", "K59.1"),
    ("obesity", "E66.9"),
    ("overweight", "E66.3"),
    ("malnutrition", "E46"),
    ("anemia", "D64.9"),
    ("hyperlipidemia", "E78.5"),
    ("hypothyroidism", "E03.9"),
    ("hyperthyroidism", "E05.90"),
];

/// Failures while building a dictionary; always fatal before the run starts.
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("failed to read dictionary {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("dictionary {path:?} has no usable term,code rows")]
    Empty { path: PathBuf },
}

/// Lookup options fixed at configuration time.
#[derive(Debug, Clone, Copy)]
pub struct DictionaryOptions {
    pub match_mode: MatchMode,
    pub case_insensitive: bool,
}

impl Default for DictionaryOptions {
    fn default() -> Self {
        Self {
            match_mode: MatchMode::Substring,
            case_insensitive: true,
        }
    }
}

#[derive(Debug, Deserialize)]
struct DictionaryRow {
    term: String,
    code: String,
}

/// Immutable term → codes table. Iteration follows insertion order, which
/// fixes the order codes are emitted in.
#[derive(Debug, Clone)]
pub struct CodeDictionary {
    terms: IndexMap<String, Vec<String>>,
    options: DictionaryOptions,
}

impl CodeDictionary {
    /// Dictionary backed by the built-in ICD-10 table.
    pub fn builtin(options: DictionaryOptions) -> Self {
        let mut dictionary = Self {
            terms: IndexMap::new(),
            options,
        };
        for (term, code) in ICD10_SEED_MAP {
            dictionary.insert(term, code);
        }
        dictionary
    }

    /// Load a `term,code` CSV supplied at configuration time. Repeated terms
    /// accumulate codes under one key.
    pub fn from_csv(path: &Path, options: DictionaryOptions) -> Result<Self, DictionaryError> {
        let read_err = |source| DictionaryError::Read {
            path: path.to_path_buf(),
            source,
        };
        let mut reader = csv::Reader::from_path(path).map_err(read_err)?;
        let mut dictionary = Self {
            terms: IndexMap::new(),
            options,
        };
        for result in reader.deserialize::<DictionaryRow>() {
            let row = result.map_err(read_err)?;
            dictionary.insert(&row.term, &row.code);
        }
        if dictionary.terms.is_empty() {
            return Err(DictionaryError::Empty {
                path: path.to_path_buf(),
            });
        }
        info!(path = %path.display(), terms = dictionary.terms.len(), "loaded code dictionary");
        Ok(dictionary)
    }

    fn insert(&mut self, term: &str, code: &str) {
        let key = if self.options.case_insensitive {
            normalize_term(term)
        } else {
            term.trim().to_string()
        };
        let code = code.trim();
        if key.is_empty() || code.is_empty() {
            return;
        }
        let codes = self.terms.entry(key).or_default();
        if !codes.iter().any(|c| c == code) {
            codes.push(code.to_string());
        }
    }

    /// Codes for every dictionary term matching the entity, in dictionary
    /// insertion order, duplicate-free.
    pub fn matching_codes(&self, entity: &str) -> Vec<&str> {
        let haystack = if self.options.case_insensitive {
            normalize_term(entity)
        } else {
            entity.to_string()
        };
        let mut codes: Vec<&str> = Vec::new();
        for (term, term_codes) in &self.terms {
            let hit = match self.options.match_mode {
                MatchMode::Substring => haystack.contains(term.as_str()),
                MatchMode::Exact => haystack == *term,
            };
            if !hit {
                continue;
            }
            for code in term_codes {
                if !codes.contains(&code.as_str()) {
                    codes.push(code.as_str());
                }
            }
        }
        codes
    }

    /// Dictionary terms in insertion order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
