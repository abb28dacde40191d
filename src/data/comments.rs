//! Loading of the pre-processed comment corpus.

use std::path::Path;

use anyhow::{anyhow, Result};
use indexmap::IndexSet;
use tracing::debug;

use crate::data::csv_reader;

/// Column holding the free-text comments.
pub const CONTENT_COLUMN: &str = "content";

/// Read the `content` column, dropping blanks and repeated comments.
///
/// First occurrences keep their position.
pub fn load_comments(path: &Path) -> Result<IndexSet<String>> {
    let mut reader = csv_reader(path)?;
    let headers = reader.headers()?.clone();
    let idx = headers
        .iter()
        .position(|h| h.trim() == CONTENT_COLUMN)
        .ok_or_else(|| anyhow!("missing `{CONTENT_COLUMN}` column in {path:?}"))?;

    let mut comments = IndexSet::new();
    let mut rows = 0usize;
    for record in reader.records() {
        let record = record?;
        rows += 1;
        let Some(value) = record.get(idx) else {
            continue;
        };
        if value.is_empty() {
            continue;
        }
        comments.insert(value.to_string());
    }
    debug!(rows, unique = comments.len(), "deduplicated comments");
    Ok(comments)
}
