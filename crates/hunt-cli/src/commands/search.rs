//! Search command implementation

use anyhow::Result;
use hunt_core::config::LayeredConfig;

use super::open_session;
use crate::cli::SearchArgs;
use crate::output::OutputWriter;
use crate::output_types::{LocationItem, LocationRow, SearchOutput};

pub async fn execute(
    args: SearchArgs,
    config: &LayeredConfig,
    output: &OutputWriter,
) -> Result<()> {
    let mut session = open_session(config)?;
    session.search(&args.query).await;

    let results: Vec<LocationItem> = session
        .locations()
        .iter()
        .enumerate()
        .map(|(i, location)| {
            LocationItem::new(i + 1, location, session.photos().contains(&location.id))
        })
        .collect();

    if output.is_json() {
        return output.result(SearchOutput {
            query: args.query,
            results,
        });
    }

    if results.is_empty() {
        output.info(format!("No locations found for '{}'", args.query));
        return Ok(());
    }

    output.section(format!("Results for '{}'", args.query));
    output.table(results.iter().map(LocationRow::from).collect());
    output.info(format!("{}", session.progress()));
    Ok(())
}
