//! Aspect extraction orchestration layer.

pub mod classifier;
pub mod normalize;
pub mod parser;
pub mod stopwords;

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::{
    config::Settings,
    data::{comments, results::ResultLogs},
    nlp::{
        classifier::{Classifier, OllamaClassifier},
        normalize::Normalizer,
        parser::{parse_response, ClassificationResult},
    },
};

/// Knobs for one extraction run.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Classify comments even if a result log already holds them.
    pub reprocess: bool,
    /// Stop after this many pending comments.
    pub limit: Option<usize>,
}

/// Per-destination tally of a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub aspects: usize,
    pub no_aspects: usize,
    pub offensive: usize,
    pub skipped: usize,
}

impl BatchSummary {
    pub fn processed(&self) -> usize {
        self.aspects + self.no_aspects + self.offensive
    }

    fn record(&mut self, result: &ClassificationResult) {
        match result {
            ClassificationResult::Offensive => self.offensive += 1,
            ClassificationResult::NoAspects => self.no_aspects += 1,
            ClassificationResult::Aspects { .. } => self.aspects += 1,
        }
    }
}

/// Run the end-to-end extraction over the configured input corpus.
pub async fn extract_aspects(settings: &Settings, options: BatchOptions) -> Result<BatchSummary> {
    let started_at: DateTime<Utc> = Utc::now();
    let clock = Instant::now();

    let comments = comments::load_comments(&settings.input_csv)
        .with_context(|| format!("reading comments from {}", settings.input_csv.display()))?;
    info!(count = comments.len(), path = %settings.input_csv.display(), "loaded comments");

    let classifier = OllamaClassifier::from_settings(settings)?;
    let normalizer = Normalizer::portuguese()?;
    let mut logs = ResultLogs::open(&settings.data_dir)?;

    let summary = run_batch(&comments, &classifier, &normalizer, &mut logs, &options).await?;

    info!(
        started_at = %started_at.to_rfc3339(),
        elapsed_secs = clock.elapsed().as_secs_f64(),
        aspects = summary.aspects,
        no_aspects = summary.no_aspects,
        offensive = summary.offensive,
        skipped = summary.skipped,
        "extraction finished"
    );
    Ok(summary)
}

/// Classify, parse and route each comment in order, one at a time.
pub async fn run_batch(
    comments: &IndexSet<String>,
    classifier: &dyn Classifier,
    normalizer: &Normalizer,
    logs: &mut ResultLogs,
    options: &BatchOptions,
) -> Result<BatchSummary> {
    let mut summary = BatchSummary::default();

    let recorded = if options.reprocess {
        IndexSet::new()
    } else {
        logs.recorded_comments()?
    };
    let mut pending: Vec<&String> = comments
        .iter()
        .filter(|comment| !recorded.contains(comment.as_str()))
        .collect();
    summary.skipped = comments.len() - pending.len();
    if let Some(limit) = options.limit {
        pending.truncate(limit);
    }
    if summary.skipped > 0 {
        info!(skipped = summary.skipped, "comments already recorded; use --reprocess to redo them");
    }

    let progress = progress_bar(pending.len() as u64)?;
    for comment in pending {
        let response = classifier.classify(comment).await;
        debug!(%response, "raw classifier response");

        let result = parse_response(&response, normalizer);
        debug!(
            positive = result.positive_field(),
            negative = result.negative_field(),
            "normalized aspects"
        );

        logs.route(comment, &result)?;
        summary.record(&result);
        progress.inc(1);
    }
    progress.finish_and_clear();

    Ok(summary)
}

fn progress_bar(len: u64) -> Result<ProgressBar> {
    let progress = ProgressBar::new(len);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?,
    );
    progress.set_message("classifying");
    progress.enable_steady_tick(Duration::from_millis(250));
    Ok(progress)
}
