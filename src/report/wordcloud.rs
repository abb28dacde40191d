//! Word clouds drawn as spiral-packed text on a plotters bitmap.

use std::path::Path;

use anyhow::Result;
use plotters::{coord::Shift, prelude::*};
use tracing::{debug, info};

use crate::report::charts::POSITIVE_GREEN;

pub const WORDCLOUDS_FILE: &str = "wordclouds_comparacao.png";

const MIN_FONT: u32 = 14;
const MAX_FONT: u32 = 72;
/// Pixels of radius gained per radian walked along the spiral.
const SPIRAL_PITCH: f64 = 2.0;
const ANGLE_STEP: f64 = 0.1;

/// A phrase with the font size it will be drawn at.
#[derive(Debug, Clone, PartialEq)]
pub struct SizedWord {
    pub text: String,
    pub font_size: u32,
    /// Frequency relative to the most frequent phrase, in `(0, 1]`.
    pub weight: f64,
}

/// A phrase with its top-left corner and box on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub sized: SizedWord,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl PlacedWord {
    pub fn overlaps(&self, other: &PlacedWord) -> bool {
        overlaps(
            (self.x, self.y, self.width, self.height),
            (other.x, other.y, other.width, other.height),
        )
    }
}

fn overlaps(a: (i32, i32, u32, u32), b: (i32, i32, u32, u32)) -> bool {
    a.0 < b.0 + b.2 as i32
        && b.0 < a.0 + a.2 as i32
        && a.1 < b.1 + b.3 as i32
        && b.1 < a.1 + a.3 as i32
}

/// Scale frequencies linearly into the font range, most frequent first.
pub fn sized_words(frequencies: &[(String, usize)]) -> Vec<SizedWord> {
    let max = frequencies.iter().map(|(_, c)| *c).max().unwrap_or(0);
    if max == 0 {
        return Vec::new();
    }
    let mut sized_words: Vec<SizedWord> = frequencies
        .iter()
        .filter(|(_, count)| *count > 0)
        .map(|(text, count)| {
            let weight = *count as f64 / max as f64;
            let font_size = MIN_FONT + ((MAX_FONT - MIN_FONT) as f64 * weight).round() as u32;
            SizedWord {
                text: text.clone(),
                font_size,
                weight,
            }
        })
        .collect();
    sized_words.sort_by(|a, b| b.font_size.cmp(&a.font_size));
    sized_words
}

/// Place words along an Archimedean spiral from the canvas center.
///
/// Words that cannot be placed without overlapping or leaving the canvas are
/// dropped. `measure` returns the `(width, height)` of a word at a font size.
pub fn layout<F>(words: &[SizedWord], canvas: (u32, u32), mut measure: F) -> Vec<PlacedWord>
where
    F: FnMut(&str, u32) -> (u32, u32),
{
    let (canvas_w, canvas_h) = canvas;
    let center = (canvas_w as f64 / 2.0, canvas_h as f64 / 2.0);
    let max_angle = (center.0.hypot(center.1) + MAX_FONT as f64) / SPIRAL_PITCH;
    let mut placed: Vec<PlacedWord> = Vec::new();

    for word in words {
        let (width, height) = measure(&word.text, word.font_size);
        if width == 0 || height == 0 || width > canvas_w || height > canvas_h {
            debug!(word = %word.text, "word larger than canvas");
            continue;
        }

        let mut angle = 0.0f64;
        while angle <= max_angle {
            let radius = SPIRAL_PITCH * angle;
            let x = (center.0 + radius * angle.cos() - width as f64 / 2.0).round() as i32;
            let y = (center.1 + radius * angle.sin() - height as f64 / 2.0).round() as i32;
            angle += ANGLE_STEP;

            let inside = x >= 0
                && y >= 0
                && x as u32 + width <= canvas_w
                && y as u32 + height <= canvas_h;
            if !inside {
                continue;
            }
            let candidate = (x, y, width, height);
            if placed
                .iter()
                .any(|p| overlaps(candidate, (p.x, p.y, p.width, p.height)))
            {
                continue;
            }
            placed.push(PlacedWord {
                sized: word.clone(),
                x,
                y,
                width,
                height,
            });
            break;
        }
    }
    placed
}

#[derive(Debug, Clone, Copy)]
enum Palette {
    Green,
    Reds,
}

impl Palette {
    fn color(self, weight: f64) -> RGBColor {
        match self {
            Palette::Green => POSITIVE_GREEN,
            Palette::Reds => {
                // Light salmon for rare phrases, dark crimson for the top ones.
                let lerp = |from: u8, to: u8| (from as f64 + (to as f64 - from as f64) * weight) as u8;
                RGBColor(lerp(252, 103), lerp(146, 0), lerp(114, 13))
            }
        }
    }
}

/// Side-by-side clouds for the positive and negative tables.
pub fn render_wordclouds(
    path: &Path,
    positive: &[(String, usize)],
    negative: &[(String, usize)],
) -> Result<()> {
    let root = BitMapBackend::new(path, (1800, 700)).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((1, 2));
    draw_cloud(&panels[0], "Word Cloud – Positive Aspects", positive, Palette::Green)?;
    draw_cloud(&panels[1], "Word Cloud – Negative Aspects", negative, Palette::Reds)?;
    root.present()?;
    info!(path = %path.display(), "wrote word clouds");
    Ok(())
}

fn draw_cloud(
    panel: &DrawingArea<BitMapBackend<'_>, Shift>,
    title: &str,
    frequencies: &[(String, usize)],
    palette: Palette,
) -> Result<()> {
    let area = panel.titled(title, ("sans-serif", 28))?;
    let canvas = area.dim_in_pixel();
    let words = sized_words(frequencies);

    let placed = layout(&words, canvas, |text, size| {
        let style = TextStyle::from(("sans-serif", size as f64).into_font());
        area.estimate_text_size(text, &style)
            .unwrap_or_else(|_| approximate_size(text, size))
    });
    debug!(title, requested = words.len(), placed = placed.len(), "laid out cloud");

    for word in &placed {
        let style = ("sans-serif", word.sized.font_size as f64)
            .into_font()
            .color(&palette.color(word.sized.weight));
        area.draw(&Text::new(word.sized.text.as_str(), (word.x, word.y), style))?;
    }
    Ok(())
}

fn approximate_size(text: &str, size: u32) -> (u32, u32) {
    let chars = text.chars().count() as f64;
    ((chars * size as f64 * 0.6).ceil() as u32, (size as f64 * 1.2).ceil() as u32)
}
