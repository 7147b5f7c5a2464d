//! CLI entry-point for probing the code dictionary.

use std::{cmp::Ordering, path::PathBuf};

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use strsim::jaro_winkler;
use tracing::instrument;

use crate::{
    cli::MatchMode,
    coding::dictionary::{CodeDictionary, DictionaryOptions},
    config::Settings,
    nlp::normalize::normalize_term,
};

/// Args for the `lookup` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Term to look up.
    #[arg(long)]
    pub term: String,
    /// Optional `term,code` dictionary CSV; defaults to the built-in table.
    #[arg(long)]
    pub dictionary: Option<PathBuf>,
    /// Dictionary lookup mode.
    #[arg(long, default_value = "substring", value_enum)]
    pub match_mode: MatchMode,
}

#[instrument(skip(_settings))]
pub async fn run(args: Args, _settings: Settings) -> Result<()> {
    let options = DictionaryOptions {
        match_mode: args.match_mode,
        ..Default::default()
    };
    let dictionary = match &args.dictionary {
        Some(path) => CodeDictionary::from_csv(path, options)
            .with_context(|| format!("load dictionary from {}", path.display()))?,
        None => CodeDictionary::builtin(options),
    };

    let term = normalize_term(&args.term);
    let codes = dictionary.matching_codes(&term);
    if codes.is_empty() {
        println!("no codes for '{term}'");
        for suggestion in suggest(&dictionary, &term) {
            println!("  did you mean: {suggestion}");
        }
    } else {
        for code in codes {
            println!("{code}");
        }
    }
    Ok(())
}

fn suggest(dictionary: &CodeDictionary, term: &str) -> Vec<String> {
    let mut scored: Vec<(f64, &str)> = dictionary
        .terms()
        .map(|candidate| (jaro_winkler(term, candidate), candidate))
        .filter(|(score, _)| *score > 0.82)
        .collect();
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
    scored
        .into_iter()
        .take(3)
        .map(|(_, candidate)| candidate.to_string())
        .collect()
}
