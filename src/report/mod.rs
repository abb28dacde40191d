//! Aggregation of result logs into frequency tables and charts.

pub mod charts;
pub mod corrections;
pub mod frequency;
pub mod wordcloud;

use std::{fs::File, path::PathBuf};

use anyhow::Result;
use polars::prelude::{CsvWriter, DataFrame, NamedFrom, SerWriter, Series};
use tracing::{info, warn};

use crate::{
    config::{Settings, ASPECTS_FILE, CORRECTED_ASPECTS_FILE, NO_ASPECTS_FILE, OFFENSIVE_FILE},
    data::results::{ResultLog, ASPECT_HEADER, OFFENSIVE_HEADER},
    report::{
        corrections::{correct_aspects_file, CORRECTIONS},
        frequency::{AspectFrequencyTable, CategoryCounts},
    },
};

/// Phrases kept per polarity in tables and charts.
pub const TOP_N: usize = 20;

/// Everything `analyze` computed, for callers that want more than files.
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub top_positive: Vec<(String, usize)>,
    pub top_negative: Vec<(String, usize)>,
    pub categories: CategoryCounts,
    pub outputs: Vec<PathBuf>,
}

/// Correct the aspects log, count phrases and render every chart.
pub async fn analyze(settings: &Settings) -> Result<Report> {
    let aspects_path = settings.join_data(ASPECTS_FILE);
    if !aspects_path.exists() {
        warn!(path = %aspects_path.display(), "aspects log missing; run extract first");
        return Ok(Report::default());
    }

    std::fs::create_dir_all(&settings.charts_dir)?;
    let rows = correct_aspects_file(
        &aspects_path,
        &settings.join_data(CORRECTED_ASPECTS_FILE),
        CORRECTIONS,
    )?;

    let positive = AspectFrequencyTable::from_fields(rows.iter().map(|r| r.positivo.as_str()));
    let negative = AspectFrequencyTable::from_fields(rows.iter().map(|r| r.negativo.as_str()));
    info!(
        positive_phrases = positive.len(),
        negative_phrases = negative.len(),
        "counted aspect phrases"
    );

    let no_aspects = ResultLog::open(settings.join_data(NO_ASPECTS_FILE), ASPECT_HEADER)?;
    let offensive = ResultLog::open(settings.join_data(OFFENSIVE_FILE), OFFENSIVE_HEADER)?;
    let categories =
        CategoryCounts::from_rows(&rows, no_aspects.row_count()?, offensive.row_count()?);
    info!(?categories, "categorised comments");

    let mut report = Report {
        top_positive: positive.top(TOP_N),
        top_negative: negative.top(TOP_N),
        categories,
        outputs: Vec::new(),
    };

    let bars = settings.join_chart(charts::BARS_FILE);
    charts::render_top_bars(&bars, &report.top_positive, &report.top_negative)?;
    let clouds = settings.join_chart(wordcloud::WORDCLOUDS_FILE);
    wordcloud::render_wordclouds(&clouds, &report.top_positive, &report.top_negative)?;
    let distribution = settings.join_chart(charts::DISTRIBUTION_FILE);
    charts::render_distribution(&distribution, &report.categories)?;
    report.outputs.extend([bars, clouds, distribution]);

    report.outputs.extend(write_tables(settings, &report)?);
    Ok(report)
}

fn write_tables(settings: &Settings, report: &Report) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for (name, ranked) in [
        ("top_positive_aspects.csv", &report.top_positive),
        ("top_negative_aspects.csv", &report.top_negative),
    ] {
        let mut df = DataFrame::new(vec![
            Series::new(
                "aspect".into(),
                ranked.iter().map(|(a, _)| a.clone()).collect::<Vec<_>>(),
            ),
            Series::new(
                "frequency".into(),
                ranked.iter().map(|(_, c)| *c as i64).collect::<Vec<_>>(),
            ),
        ])?;
        written.push(write_csv(settings.join_chart(name), &mut df)?);
    }

    let entries = report.categories.entries();
    let mut df = DataFrame::new(vec![
        Series::new(
            "category".into(),
            entries
                .iter()
                .map(|(c, _)| c.label().to_string())
                .collect::<Vec<_>>(),
        ),
        Series::new(
            "count".into(),
            entries.iter().map(|(_, n)| *n as i64).collect::<Vec<_>>(),
        ),
    ])?;
    written.push(write_csv(settings.join_chart("category_distribution.csv"), &mut df)?);
    Ok(written)
}

fn write_csv(path: PathBuf, df: &mut DataFrame) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = File::create(&path)?;
    CsvWriter::new(&mut file).finish(df)?;
    info!(path = %path.display(), rows = df.height(), "wrote table");
    Ok(path)
}
