//! Automated ICD-10 diagnosis extraction from clinical narratives.

pub mod api;
pub mod cli;
pub mod coding;
pub mod config;
pub mod data;
pub mod logging;
pub mod nlp;
pub mod pipeline;
