//! Runtime configuration utilities for ev-aspects.

use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;

/// Default Ollama generation endpoint.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434/api/generate";
/// Default model served by the local endpoint.
pub const DEFAULT_MODEL: &str = "llama3.2";

/// Result log holding comments with at least one aspect.
pub const ASPECTS_FILE: &str = "final_llama32_comentarios_aspectos.csv";
/// Result log holding comments without aspects.
pub const NO_ASPECTS_FILE: &str = "final_llama32_comentarios_sem_aspectos.csv";
/// Result log holding comments flagged as offensive.
pub const OFFENSIVE_FILE: &str = "final_llama32_comentarios_ofensivos.csv";
/// Aspects log after the correction pass.
pub const CORRECTED_ASPECTS_FILE: &str = "final_llama32_comentarios_aspectos_corrigido.csv";
const INPUT_FILE: &str = "2_comentarios_pre_processados.csv";

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Generation endpoint of the local LLM server.
    pub ollama_url: String,
    /// Model identifier sent with each request.
    pub model: String,
    /// Folder holding the input corpus and the result logs.
    pub data_dir: PathBuf,
    /// Folder receiving chart images and summary tables.
    pub charts_dir: PathBuf,
    /// Source CSV with a `content` column.
    pub input_csv: PathBuf,
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let ollama_url =
            env::var("OLLAMA_URL").unwrap_or_else(|_| DEFAULT_OLLAMA_URL.to_string());
        let model = env::var("OLLAMA_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));
        let charts_dir = env::var("CHARTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./graficos_llama"));
        let input_csv = env::var("INPUT_CSV")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join(INPUT_FILE));

        Self::with_dirs(ollama_url, model, data_dir, charts_dir, input_csv)
    }

    /// Build settings from explicit values, creating the working folders.
    pub fn with_dirs(
        ollama_url: String,
        model: String,
        data_dir: PathBuf,
        charts_dir: PathBuf,
        input_csv: PathBuf,
    ) -> anyhow::Result<Self> {
        std::fs::create_dir_all(&data_dir).context("creating data dir")?;
        std::fs::create_dir_all(&charts_dir).context("creating charts dir")?;

        Ok(Self {
            ollama_url,
            model,
            data_dir,
            charts_dir,
            input_csv,
        })
    }

    /// Convenience helper for derived path segments.
    pub fn join_data<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.data_dir.join(path)
    }

    /// Convenience helper for chart output paths.
    pub fn join_chart<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.charts_dir.join(path)
    }
}
