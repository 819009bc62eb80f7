//! Maps command implementation

use anyhow::Result;
use hunt_core::config::LayeredConfig;
use hunt_session::PreloadSummary;

use super::{open_session, Session};
use crate::cli::SearchArgs;
use crate::output::OutputWriter;
use crate::output_types::MapsOutput;
use crate::progress::{create_spinner, finish_success};

pub async fn execute(
    args: SearchArgs,
    config: &LayeredConfig,
    output: &OutputWriter,
) -> Result<()> {
    let mut session = open_session(config)?;
    session.search(&args.query).await;
    if session.locations().is_empty() && !output.is_json() {
        output.info(format!("No locations found for '{}'", args.query));
        return Ok(());
    }

    let result = preload_with_spinner(&mut session, output).await;

    if output.is_json() {
        return output.result(result_for(&args.query, &session, result));
    }
    if result.failed > 0 {
        output.warning(format!("{} maps could not be rendered", result.failed));
    }
    output.success(format!(
        "{} maps ready ({} cached, {} rendered)",
        result.cached + result.rendered,
        result.cached,
        result.rendered
    ));
    Ok(())
}

/// Preload snapshots while a spinner names the current location
pub async fn preload_with_spinner(
    session: &mut Session,
    output: &OutputWriter,
) -> PreloadSummary {
    let total = session.locations().len();
    let spinner = create_spinner("Preparing maps...", output.is_json());
    let summary = session
        .preload_maps(|index, location| {
            spinner.set_message(format!("Map {}/{}: {}", index + 1, total, location.name));
        })
        .await;
    finish_success(&spinner, "Maps prepared");
    summary
}

fn result_for(query: &str, session: &Session, summary: PreloadSummary) -> MapsOutput {
    MapsOutput {
        query: query.to_string(),
        locations: session.locations().len(),
        cached: summary.cached,
        rendered: summary.rendered,
        failed: summary.failed,
    }
}
