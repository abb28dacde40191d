//! Input corpus and result log persistence.

pub mod comments;
pub mod results;

use std::path::Path;

use anyhow::{Context, Result};

/// Open a CSV file for reading, tolerating a leading UTF-8 BOM.
pub fn csv_reader(path: &Path) -> Result<csv::Reader<std::io::Cursor<Vec<u8>>>> {
    let mut bytes = std::fs::read(path).with_context(|| format!("read {path:?}"))?;
    if bytes.starts_with(b"\xEF\xBB\xBF") {
        bytes.drain(..3);
    }
    Ok(csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(std::io::Cursor::new(bytes)))
}
