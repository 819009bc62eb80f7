//! Forget command implementation

use anyhow::Result;
use hunt_core::config::LayeredConfig;

use super::{open_session, pick_location};
use crate::cli::PickArgs;
use crate::output::OutputWriter;
use crate::output_types::PhotoActionOutput;

pub async fn execute(args: PickArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let mut session = open_session(config)?;
    let location = pick_location(&mut session, &args.query, args.pick).await?;
    let removed = session.forget_photo(&location.id)?;

    if output.is_json() {
        return output.result(PhotoActionOutput {
            location: location.name,
            id: location.id.to_string(),
            outcome: if removed { "removed" } else { "unchanged" },
            source: None,
        });
    }

    if removed {
        output.success(format!("Removed the photo of {}", location.name));
    } else {
        output.info(format!("{} has no stored photo", location.name));
    }
    Ok(())
}
