//! Canonicalisation of aspect phrase lists returned by the classifier.

use std::collections::HashSet;

use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

use crate::nlp::stopwords;

/// Marker written wherever a polarity has no aspect.
pub const SENTINEL: &str = "nenhum";

/// Placeholder the model sometimes echoes back from the prompt template.
const PLACEHOLDER: &str = "aspecto";

/// Default grouping rules merging near-duplicate phrasings, applied in order.
pub const CANONICAL_RULES: &[(&str, &str)] = &[
    (
        r"(preço|custo|custos).*(alto|elevado|caro|altos|excessivo)",
        "custo alto",
    ),
    (r"(demora|lento|devagar)", "carregamento lento"),
    (r"(baixa|limitada|pouca)", "limitada"),
    (
        r"(sem carregador|poucos postos|infraestrutura ruim|sem infraestrutura)",
        "falta de infraestrutura",
    ),
    (
        r"(baixa potência|motor.*fraco|subida.*fraca)",
        "potência baixa",
    ),
    (r"(revenda ruim|baixa revenda|perda.*valor)", "baixa revenda"),
    (
        r"(falta informações sobre veículo elétrico|falta conhecimento sobre tecnologia|falta conhecimento sobre tecnologia veículos elétricos|falta conhecimento sobre carros elétricos|falta conhecimento técnico)\b",
        "falta de conhecimento técnico",
    ),
    (
        r"\b(nenhum aspectos técnicos claros extrair|nenhuma|não há|nao ha|nao tem|não tem|nada|não especificado|nenhum aspecto|none)\b",
        SENTINEL,
    ),
];

static ASPECT_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\baspecto\s*\d+\s*[\-,.:;]*\s*").expect("valid marker regex"));
static DISALLOWED_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9áéíóúâêîôûãõç ,]").expect("valid charset regex"));
static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// A single `pattern -> label` substitution.
#[derive(Debug, Clone)]
pub struct CanonicalRule {
    pub pattern: Regex,
    pub replacement: String,
}

impl CanonicalRule {
    pub fn new(pattern: &str, replacement: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            replacement: replacement.to_string(),
        })
    }

    /// Compile an ordered `(pattern, replacement)` table.
    pub fn compile_all(table: &[(&str, &str)]) -> Result<Vec<Self>, regex::Error> {
        table
            .iter()
            .map(|(pattern, replacement)| Self::new(pattern, replacement))
            .collect()
    }
}

/// Cleans a raw phrase list into a canonical, comma-joined string.
#[derive(Debug, Clone)]
pub struct Normalizer {
    rules: Vec<CanonicalRule>,
    stopwords: HashSet<&'static str>,
}

impl Normalizer {
    pub fn new(rules: Vec<CanonicalRule>, stopwords: HashSet<&'static str>) -> Self {
        Self { rules, stopwords }
    }

    /// Normalizer configured with [`CANONICAL_RULES`] and the Portuguese stopwords.
    pub fn portuguese() -> Result<Self, regex::Error> {
        Ok(Self::new(
            CanonicalRule::compile_all(CANONICAL_RULES)?,
            stopwords::portuguese().clone(),
        ))
    }

    pub fn rules(&self) -> &[CanonicalRule] {
        &self.rules
    }

    /// Returns `None` when nothing survives cleaning or the text collapses to the sentinel.
    pub fn normalize(&self, raw: &str) -> Option<String> {
        if raw.trim().is_empty() {
            return None;
        }

        let text = raw.trim().to_lowercase();
        let text = ASPECT_MARKER.replace_all(&text, "");
        let text = DISALLOWED_CHARS.replace_all(&text, " ");
        let text = WHITESPACE_RUN.replace_all(&text, " ");

        let segments: IndexSet<&str> = text
            .split(',')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .collect();

        let filtered: Vec<String> = segments
            .into_iter()
            .map(|segment| {
                segment
                    .split_whitespace()
                    .filter(|word| !self.stopwords.contains(*word))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .filter(|segment| !segment.is_empty())
            .collect();

        if filtered.is_empty() {
            return None;
        }

        let mut joined = filtered.join(", ");
        for rule in &self.rules {
            joined = rule
                .pattern
                .replace_all(&joined, NoExpand(&rule.replacement))
                .into_owned();
        }

        let canonical = joined
            .trim_matches(|c: char| c == ',' || c == '.' || c == ' ')
            .trim();
        if canonical.is_empty() || canonical == PLACEHOLDER || canonical == SENTINEL {
            return None;
        }
        Some(canonical.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> Normalizer {
        Normalizer::portuguese().unwrap()
    }

    #[test]
    fn strips_numbered_markers() {
        let out = normalizer().normalize("Aspecto 1: bateria durável, aspecto 2 - torque");
        assert_eq!(out.as_deref(), Some("bateria durável, torque"));
    }

    #[test]
    fn deduplicates_before_stopword_filter() {
        let out = normalizer().normalize("bateria, bateria, a bateria");
        assert_eq!(out.as_deref(), Some("bateria, bateria"));
    }

    #[test]
    fn placeholder_is_sentinel() {
        assert_eq!(normalizer().normalize("aspecto"), None);
        assert_eq!(normalizer().normalize("aspecto."), None);
    }

    #[test]
    fn later_rules_see_earlier_output() {
        let out = normalizer().normalize("recarga lenta, carregamento lento");
        assert_eq!(
            out.as_deref(),
            Some("recarga lenta, carregamento carregamento lento")
        );
    }
}
