//! Runtime configuration utilities for icd-assistant.

use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Root folder for input record sets and cached artefacts.
    pub data_dir: PathBuf,
    /// Root folder for extraction outputs.
    pub outputs_dir: PathBuf,
    /// Endpoint of a remote clinical recognizer service, if any.
    pub ner_endpoint: Option<String>,
    /// Number of records processed concurrently during extraction.
    pub concurrency: usize,
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));
        let outputs_dir = env::var("OUTPUTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./outputs"));
        let ner_endpoint = env::var("NER_ENDPOINT").ok().filter(|v| !v.trim().is_empty());
        let concurrency = env::var("PIPELINE_CONCURRENCY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(4);

        std::fs::create_dir_all(&data_dir).context("creating data dir")?;
        std::fs::create_dir_all(&outputs_dir).context("creating outputs dir")?;

        Ok(Self {
            data_dir,
            outputs_dir,
            ner_endpoint,
            concurrency,
        })
    }

    /// Convenience helper for derived path segments.
    pub fn join_data<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.data_dir.join(path)
    }

    /// Convenience helper for derived output path segments.
    pub fn join_output<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.outputs_dir.join(path)
    }
}
