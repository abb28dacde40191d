//! Bar charts rendered with plotters.

use std::path::Path;

use anyhow::Result;
use plotters::{coord::Shift, prelude::*};
use tracing::info;

use crate::report::frequency::{Category, CategoryCounts};

pub const BARS_FILE: &str = "top_aspects_bars.png";
pub const DISTRIBUTION_FILE: &str = "total_distribution_detailed.png";

pub const POSITIVE_GREEN: RGBColor = RGBColor(0, 128, 0);
pub const NEGATIVE_RED: RGBColor = RGBColor(214, 39, 40);

fn category_color(category: Category) -> RGBColor {
    match category {
        Category::OnlyPositive => POSITIVE_GREEN,
        Category::OnlyNegative => NEGATIVE_RED,
        Category::Both => RGBColor(218, 165, 32),
        Category::NoAspects => RGBColor(128, 128, 128),
        Category::Offensive => RGBColor(128, 0, 128),
    }
}

/// Headroom so value labels fit to the right of (or above) the longest bar.
fn axis_max(max: usize) -> u32 {
    ((max as f64) * 1.15).ceil() as u32 + 1
}

/// Two side-by-side horizontal bar charts of the top phrases per polarity.
pub fn render_top_bars(
    path: &Path,
    positive: &[(String, usize)],
    negative: &[(String, usize)],
) -> Result<()> {
    let root = BitMapBackend::new(path, (1680, 720)).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((1, 2));
    draw_ranked_bars(&panels[0], "Top 20 Positive Aspects", positive, POSITIVE_GREEN)?;
    draw_ranked_bars(&panels[1], "Top 20 Negative Aspects", negative, NEGATIVE_RED)?;
    root.present()?;
    info!(path = %path.display(), "wrote aspect bar charts");
    Ok(())
}

fn draw_ranked_bars(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    title: &str,
    items: &[(String, usize)],
    color: RGBColor,
) -> Result<()> {
    // Rank 0 sits on the top row.
    let rows = items.len().max(1) as i32;
    let max = items.iter().map(|(_, count)| *count).max().unwrap_or(0);
    let label_for = |pos: i32| -> String {
        let rank = (rows - 1 - pos) as usize;
        items
            .get(rank)
            .map(|(phrase, _)| phrase.clone())
            .unwrap_or_default()
    };

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 24))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(240)
        .build_cartesian_2d(0u32..axis_max(max), (0i32..rows).into_segmented())?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(rows as usize)
        .y_label_formatter(&|value| match value {
            SegmentValue::CenterOf(pos) | SegmentValue::Exact(pos) => label_for(*pos),
            SegmentValue::Last => String::new(),
        })
        .x_desc("frequency")
        .draw()?;

    chart.draw_series(items.iter().enumerate().map(|(rank, (_, count))| {
        let pos = rows - 1 - rank as i32;
        let mut bar = Rectangle::new(
            [
                (0u32, SegmentValue::Exact(pos)),
                (*count as u32, SegmentValue::Exact(pos + 1)),
            ],
            color.filled(),
        );
        bar.set_margin(4, 4, 0, 0);
        bar
    }))?;

    chart.draw_series(items.iter().enumerate().map(|(rank, (_, count))| {
        let pos = rows - 1 - rank as i32;
        EmptyElement::at((*count as u32, SegmentValue::CenterOf(pos)))
            + Text::new(count.to_string(), (6, -8), ("sans-serif", 15).into_font())
    }))?;

    Ok(())
}

/// Vertical bars with one color per comment category.
pub fn render_distribution(path: &Path, counts: &CategoryCounts) -> Result<()> {
    let entries = counts.entries();
    let columns = entries.len() as i32;
    let max = entries.iter().map(|(_, count)| *count).max().unwrap_or(0);

    let root = BitMapBackend::new(path, (1000, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Distribution of Comments by Sentiment and Category",
            ("sans-serif", 24),
        )
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(64)
        .build_cartesian_2d((0i32..columns).into_segmented(), 0u32..axis_max(max))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(entries.len())
        .x_label_formatter(&|value| match value {
            SegmentValue::CenterOf(idx) | SegmentValue::Exact(idx) => entries
                .get(*idx as usize)
                .map(|(category, _)| category.label().to_string())
                .unwrap_or_default(),
            SegmentValue::Last => String::new(),
        })
        .y_desc("Number of Comments")
        .draw()?;

    chart.draw_series(entries.iter().enumerate().map(|(idx, (category, count))| {
        let idx = idx as i32;
        let mut bar = Rectangle::new(
            [
                (SegmentValue::Exact(idx), 0u32),
                (SegmentValue::Exact(idx + 1), *count as u32),
            ],
            category_color(*category).filled(),
        );
        bar.set_margin(0, 0, 14, 14);
        bar
    }))?;

    chart.draw_series(entries.iter().enumerate().map(|(idx, (_, count))| {
        EmptyElement::at((SegmentValue::CenterOf(idx as i32), *count as u32))
            + Text::new(count.to_string(), (-6, -22), ("sans-serif", 18).into_font())
    }))?;

    root.present()?;
    info!(path = %path.display(), "wrote category distribution chart");
    Ok(())
}
