//! Command-line interface wiring for ev-aspects.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Settings;

pub mod analyze;
pub mod extract;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Electric-vehicle aspect extraction and reporting", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Extract(args) => extract::run(args, settings).await,
            Commands::Analyze => analyze::run(settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Classify comments with the local LLM and append them to the result logs.
    Extract(extract::Args),
    /// Correct the aspects log, count phrases and render charts.
    Analyze,
}
