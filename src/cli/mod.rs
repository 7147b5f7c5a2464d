//! Command-line interface wiring for icd-assistant.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use crate::config::Settings;

pub mod extract;
pub mod lookup;
pub mod serve;
pub mod validate;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Automated ICD-10 diagnosis extraction", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Extract(args) => extract::run(args, settings).await,
            Commands::Validate(args) => validate::run(args, settings).await,
            Commands::Lookup(args) => lookup::run(args, settings).await,
            Commands::Serve(args) => serve::run(args, settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the extraction pipeline over a records CSV.
    Extract(extract::Args),
    /// Check a records CSV and dictionary before a run.
    Validate(validate::Args),
    /// Probe the code dictionary for a single term.
    Lookup(lookup::Args),
    /// Serve the JSON API over exported results.
    Serve(serve::Args),
}

/// Comparison basis for ground-truth evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EvalBasis {
    /// Compare normalized entity strings against the reference diagnosis.
    Entities,
    /// Compare mapped ICD-10 codes against the reference diagnosis.
    Codes,
}

impl EvalBasis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Entities => "entities",
            Self::Codes => "codes",
        }
    }
}

/// Direction of the evaluation containment check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum MatchDirection {
    /// A detected term must occur inside the reference diagnosis.
    DetectedInReference,
    /// The whole reference diagnosis must occur inside a detected term.
    ReferenceInDetected,
}

/// Dictionary lookup mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum MatchMode {
    /// A dictionary term matches when it occurs inside the entity.
    Substring,
    /// A dictionary term matches only when it equals the entity.
    Exact,
}
