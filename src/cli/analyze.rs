//! CLI entry-point for the aggregation and chart report.

use anyhow::Result;
use tracing::{info, instrument};

use crate::{config::Settings, report};

#[instrument(skip(settings))]
pub async fn run(settings: Settings) -> Result<()> {
    let report = report::analyze(&settings).await?;
    for path in &report.outputs {
        info!(path = %path.display(), "report output");
    }
    Ok(())
}
