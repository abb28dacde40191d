//! CLI entry-point for aspect extraction.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{
    config::Settings,
    nlp::{self, BatchOptions},
};

/// Args for the `extract` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Override the input CSV (must contain a `content` column).
    #[arg(long)]
    pub input: Option<PathBuf>,
    /// Process at most this many pending comments.
    #[arg(long)]
    pub limit: Option<usize>,
    /// Classify comments already present in the result logs again.
    #[arg(long, default_value_t = false)]
    pub reprocess: bool,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, mut settings: Settings) -> Result<()> {
    if let Some(input) = args.input {
        settings.input_csv = input;
    }
    let options = BatchOptions {
        reprocess: args.reprocess,
        limit: args.limit,
    };
    let summary = nlp::extract_aspects(&settings, options).await?;
    println!(
        "processed {} comments ({} with aspects, {} without, {} offensive, {} skipped)",
        summary.processed(),
        summary.aspects,
        summary.no_aspects,
        summary.offensive,
        summary.skipped
    );
    Ok(())
}
