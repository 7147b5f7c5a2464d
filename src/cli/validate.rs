//! CLI entry-point for pre-run input checks.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{
    coding::dictionary::{CodeDictionary, DictionaryOptions},
    config::Settings,
    data::records,
};

/// Args for the `validate` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Path to the records CSV.
    #[arg(long)]
    pub input: PathBuf,
    /// Optional dictionary CSV to check alongside the input.
    #[arg(long)]
    pub dictionary: Option<PathBuf>,
}

#[instrument(skip(_settings))]
pub async fn run(args: Args, _settings: Settings) -> Result<()> {
    records::validate_columns(&args.input)
        .with_context(|| format!("validate {}", args.input.display()))?;
    println!("input ok: {}", args.input.display());

    let dictionary = match &args.dictionary {
        Some(path) => CodeDictionary::from_csv(path, DictionaryOptions::default())
            .with_context(|| format!("load dictionary from {}", path.display()))?,
        None => CodeDictionary::builtin(DictionaryOptions::default()),
    };
    println!("dictionary ok: {} terms", dictionary.len());
    Ok(())
}
