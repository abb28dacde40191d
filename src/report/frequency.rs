//! Phrase frequency and category tallies over the corrected aspects.

use indexmap::IndexMap;

use crate::{data::results::AspectRow, nlp::normalize::SENTINEL};

fn is_sentinel(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case(SENTINEL)
}

/// Occurrence counts of canonical phrases for one polarity.
///
/// Insertion order is kept so ties rank by first appearance.
#[derive(Debug, Clone, Default)]
pub struct AspectFrequencyTable {
    counts: IndexMap<String, usize>,
}

impl AspectFrequencyTable {
    pub fn from_fields<'a, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut table = Self::default();
        for field in fields {
            table.add_field(field);
        }
        table
    }

    /// Count every comma-separated phrase of a persisted field.
    pub fn add_field(&mut self, field: &str) {
        if is_sentinel(field) {
            return;
        }
        for phrase in field.split(',') {
            let phrase = phrase.trim().to_lowercase();
            if phrase.is_empty() || phrase == SENTINEL {
                continue;
            }
            *self.counts.entry(phrase).or_insert(0) += 1;
        }
    }

    pub fn count(&self, phrase: &str) -> usize {
        self.counts.get(phrase).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The `n` most frequent phrases, highest first.
    pub fn top(&self, n: usize) -> Vec<(String, usize)> {
        let mut ranked: Vec<(String, usize)> = self
            .counts
            .iter()
            .map(|(phrase, count)| (phrase.clone(), *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    OnlyPositive,
    OnlyNegative,
    Both,
    NoAspects,
    Offensive,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Self::OnlyPositive => "Only Positive",
            Self::OnlyNegative => "Only Negative",
            Self::Both => "Positive and Negative",
            Self::NoAspects => "No Aspects",
            Self::Offensive => "Offensive Language",
        }
    }
}

/// Comment totals across the three result logs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    pub only_positive: usize,
    pub only_negative: usize,
    pub both: usize,
    pub no_aspects: usize,
    pub offensive: usize,
}

impl CategoryCounts {
    pub fn from_rows(rows: &[AspectRow], no_aspects: usize, offensive: usize) -> Self {
        let mut counts = Self {
            no_aspects,
            offensive,
            ..Self::default()
        };
        for row in rows {
            match (is_sentinel(&row.positivo), is_sentinel(&row.negativo)) {
                (false, true) => counts.only_positive += 1,
                (true, false) => counts.only_negative += 1,
                (false, false) => counts.both += 1,
                (true, true) => {}
            }
        }
        counts
    }

    pub fn entries(&self) -> [(Category, usize); 5] {
        [
            (Category::OnlyPositive, self.only_positive),
            (Category::OnlyNegative, self.only_negative),
            (Category::Both, self.both),
            (Category::NoAspects, self.no_aspects),
            (Category::Offensive, self.offensive),
        ]
    }
}
