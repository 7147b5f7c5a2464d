//! CLI entry-point for a full extraction run.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{
    cli::{EvalBasis, MatchDirection, MatchMode},
    coding::{
        dictionary::{CodeDictionary, DictionaryOptions},
        evaluate::EvalOptions,
    },
    config::Settings,
    data::{export, records},
    nlp::ner,
    pipeline::IngestedCorpus,
};

/// Args for the `extract` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Path to the records CSV; defaults to `records.csv` under the data dir.
    #[arg(long)]
    pub input: Option<PathBuf>,
    /// Optional `term,code` dictionary CSV; defaults to the built-in table.
    #[arg(long)]
    pub dictionary: Option<PathBuf>,
    /// Dictionary lookup mode.
    #[arg(long, default_value = "substring", value_enum)]
    pub match_mode: MatchMode,
    /// Treat dictionary terms case-sensitively.
    #[arg(long, default_value_t = false)]
    pub case_sensitive: bool,
    /// Comparison basis for evaluation.
    #[arg(long, default_value = "entities", value_enum)]
    pub eval_basis: EvalBasis,
    /// Direction of the evaluation containment check.
    #[arg(long, default_value = "detected-in-reference", value_enum)]
    pub direction: MatchDirection,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let input = args
        .input
        .clone()
        .unwrap_or_else(|| settings.join_data("records.csv"));
    let records = records::load_records(&input)
        .with_context(|| format!("load records from {}", input.display()))?;

    let options = DictionaryOptions {
        match_mode: args.match_mode,
        case_insensitive: !args.case_sensitive,
    };
    let dictionary = match &args.dictionary {
        Some(path) => CodeDictionary::from_csv(path, options)
            .with_context(|| format!("load dictionary from {}", path.display()))?,
        None => CodeDictionary::builtin(options),
    };
    info!(terms = dictionary.len(), "code dictionary ready");

    let recognizer = ner::load_model(&settings).await?;
    let corpus = IngestedCorpus::new(records);
    info!(records = corpus.len(), "corpus ready for extraction");
    let extracted = corpus.extract(recognizer, settings.concurrency).await;
    let report = extracted.report(
        &dictionary,
        EvalOptions {
            basis: args.eval_basis,
            direction: args.direction,
        },
    );

    let csv_path = export::export_all(&report, args.eval_basis, &settings)?;

    let summary = &report.summary;
    println!("\nExtraction Results:");
    println!("  Accuracy: {:.2}%", summary.accuracy * 100.0);
    println!("  Total Records Processed: {}", summary.total_records);
    println!("  Correctly Matched Records: {}", summary.matched_records);
    println!("  Incorrectly Matched Records: {}", summary.unmatched_records);
    println!("\nResults saved to: {}", csv_path.display());
    Ok(())
}
