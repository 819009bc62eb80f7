//! Export command implementation

use anyhow::{Context, Result};
use chrono::Local;
use hunt_core::config::LayeredConfig;

use super::maps::preload_with_spinner;
use super::open_session;
use crate::cli::SearchArgs;
use crate::output::OutputWriter;
use crate::output_types::ExportOutput;

pub async fn execute(
    args: SearchArgs,
    config: &LayeredConfig,
    output: &OutputWriter,
) -> Result<()> {
    let mut session = open_session(config)?;
    session.search(&args.query).await;
    if session.locations().is_empty() {
        let message = format!(
            "No locations found for '{}'; exporting the cover only",
            args.query
        );
        output.warning(message);
    }

    preload_with_spinner(&mut session, output).await;
    let report = session
        .write_report(Local::now())
        .context("Failed to export report")?;

    let result = ExportOutput {
        path: report.path.display().to_string(),
        pages: report.page_count,
        found: report.progress.found,
        total: report.progress.total,
        message: report.progress.message(),
    };

    if output.is_json() {
        return output.result(result);
    }

    output.success(format!("Report written to {}", result.path));
    output.kv("Pages", result.pages);
    output.kv("Progress", report.progress);
    output.kv("Status", result.message);
    Ok(())
}
