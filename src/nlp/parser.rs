//! Extraction of positive/negative phrase lists from classifier answers.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::nlp::normalize::{Normalizer, SENTINEL};

/// Terms whose presence marks a comment as offensive.
pub const OFFENSIVE_MARKERS: &[&str] = &[
    "linguagem ofensiva",
    "racismo",
    "xenofobia",
    "misoginia",
    "ameaça",
    "ameaças",
];

/// Text stored in the offensive log's `resposta` column.
pub const OFFENSIVE_LABEL: &str = "linguagem ofensiva";

static BOTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)positivos?:\s*(.*?)(?:\s+)?negativos?:\s*(.*)").expect("valid regex")
});
static POSITIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)positivos?:\s*(.*)").expect("valid regex"));
static NEGATIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)negativos?:\s*(.*)").expect("valid regex"));

/// Outcome of classifying a single comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationResult {
    Offensive,
    NoAspects,
    /// At least one side is present; `None` stands for the sentinel.
    Aspects {
        positive: Option<String>,
        negative: Option<String>,
    },
}

impl ClassificationResult {
    pub fn from_polarities(positive: Option<String>, negative: Option<String>) -> Self {
        if positive.is_none() && negative.is_none() {
            Self::NoAspects
        } else {
            Self::Aspects { positive, negative }
        }
    }

    /// Positive field as written to disk.
    pub fn positive_field(&self) -> &str {
        match self {
            Self::Aspects {
                positive: Some(p), ..
            } => p.as_str(),
            _ => SENTINEL,
        }
    }

    /// Negative field as written to disk.
    pub fn negative_field(&self) -> &str {
        match self {
            Self::Aspects {
                negative: Some(n), ..
            } => n.as_str(),
            _ => SENTINEL,
        }
    }
}

pub fn is_offensive(response: &str) -> bool {
    let lower = response.to_lowercase();
    OFFENSIVE_MARKERS.iter().any(|term| lower.contains(term))
}

/// Split a raw answer into its polarities and normalize each side.
///
/// The combined `positivos ... negativos ...` pattern is tried first so the
/// negative-only pattern never swallows text belonging to the positive group.
pub fn parse_response(response: &str, normalizer: &Normalizer) -> ClassificationResult {
    if is_offensive(response) {
        return ClassificationResult::Offensive;
    }

    if let Some(caps) = BOTH.captures(response) {
        let positive = normalizer.normalize(caps.get(1).map_or("", |m| m.as_str()));
        let negative = normalizer.normalize(caps.get(2).map_or("", |m| m.as_str()));
        return ClassificationResult::from_polarities(positive, negative);
    }

    let positive = POSITIVE
        .captures(response)
        .and_then(|caps| caps.get(1))
        .and_then(|m| normalizer.normalize(m.as_str()));
    let negative = NEGATIVE
        .captures(response)
        .and_then(|caps| caps.get(1))
        .and_then(|m| normalizer.normalize(m.as_str()));
    ClassificationResult::from_polarities(positive, negative)
}
