//! Append-only CSV result logs written by the extraction batch.

use std::{
    fs::OpenOptions,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    config::{ASPECTS_FILE, NO_ASPECTS_FILE, OFFENSIVE_FILE},
    data::csv_reader,
    nlp::parser::{ClassificationResult, OFFENSIVE_LABEL},
};

pub const ASPECT_HEADER: &[&str] = &["comentario", "positivo", "negativo"];
pub const OFFENSIVE_HEADER: &[&str] = &["comentario", "resposta"];

/// Row shape shared by the aspects and no-aspects logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AspectRow {
    pub comentario: String,
    pub positivo: String,
    pub negativo: String,
}

/// A CSV file that only ever grows.
///
/// The header goes out with the first row written to a missing or empty
/// file and never again for the lifetime of this handle.
#[derive(Debug)]
pub struct ResultLog {
    path: PathBuf,
    header: &'static [&'static str],
    header_pending: bool,
}

impl ResultLog {
    pub fn open(path: impl Into<PathBuf>, header: &'static [&'static str]) -> Result<Self> {
        let path = path.into();
        let header_pending = match std::fs::metadata(&path) {
            Ok(meta) => meta.len() == 0,
            Err(err) if err.kind() == ErrorKind::NotFound => true,
            Err(err) => return Err(err).with_context(|| format!("stat {path:?}")),
        };
        debug!(path = %path.display(), header_pending, "opened result log");
        Ok(Self {
            path,
            header,
            header_pending,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn header_pending(&self) -> bool {
        self.header_pending
    }

    pub fn append(&mut self, record: &[&str]) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("open {:?} for append", self.path))?;
        let mut writer = csv::Writer::from_writer(file);
        if self.header_pending {
            writer.write_record(self.header)?;
        }
        writer.write_record(record)?;
        writer.flush()?;
        self.header_pending = false;
        Ok(())
    }

    /// Comments (first column) already present on disk, in file order.
    pub fn recorded_comments(&self) -> Result<IndexSet<String>> {
        if !self.path.exists() {
            return Ok(IndexSet::new());
        }
        let mut reader = csv_reader(&self.path)?;
        let mut seen = IndexSet::new();
        for record in reader.records() {
            if let Some(comment) = record?.get(0) {
                seen.insert(comment.to_string());
            }
        }
        Ok(seen)
    }

    /// Number of data rows on disk; a missing file counts as empty.
    pub fn row_count(&self) -> Result<usize> {
        if !self.path.exists() {
            return Ok(0);
        }
        let mut reader = csv_reader(&self.path)?;
        let mut rows = 0usize;
        for record in reader.records() {
            record?;
            rows += 1;
        }
        Ok(rows)
    }
}

/// The three mutually exclusive destinations of a classified comment.
#[derive(Debug)]
pub struct ResultLogs {
    pub aspects: ResultLog,
    pub no_aspects: ResultLog,
    pub offensive: ResultLog,
}

impl ResultLogs {
    pub fn open(dir: &Path) -> Result<Self> {
        let logs = Self {
            aspects: ResultLog::open(dir.join(ASPECTS_FILE), ASPECT_HEADER)?,
            no_aspects: ResultLog::open(dir.join(NO_ASPECTS_FILE), ASPECT_HEADER)?,
            offensive: ResultLog::open(dir.join(OFFENSIVE_FILE), OFFENSIVE_HEADER)?,
        };
        info!(dir = %dir.display(), "result logs ready");
        Ok(logs)
    }

    /// Append `comment` to exactly one log according to `result`.
    pub fn route(&mut self, comment: &str, result: &ClassificationResult) -> Result<()> {
        match result {
            ClassificationResult::Offensive => self.offensive.append(&[comment, OFFENSIVE_LABEL]),
            ClassificationResult::NoAspects => self.no_aspects.append(&[
                comment,
                result.positive_field(),
                result.negative_field(),
            ]),
            ClassificationResult::Aspects { .. } => self.aspects.append(&[
                comment,
                result.positive_field(),
                result.negative_field(),
            ]),
        }
    }

    /// Every comment already stored in any of the logs.
    pub fn recorded_comments(&self) -> Result<IndexSet<String>> {
        let mut seen = self.aspects.recorded_comments()?;
        seen.extend(self.no_aspects.recorded_comments()?);
        seen.extend(self.offensive.recorded_comments()?);
        Ok(seen)
    }
}
