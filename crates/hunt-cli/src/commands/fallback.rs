//! Fallback command implementation

use anyhow::Result;
use hunt_core::config::LayeredConfig;
use hunt_session::PhotoRequest;

use super::{describe, open_session, pick_location};
use crate::cli::PickArgs;
use crate::errors;
use crate::output::OutputWriter;

pub async fn execute(args: PickArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let mut session = open_session(config)?;
    let location = pick_location(&mut session, &args.query, args.pick).await?;

    let has_photo = session.photos().contains(&location.id);
    if !has_photo && config.unsplash_access_key.value.is_none() {
        return Err(errors::stock_photos_unavailable().into());
    }

    let resolution = session
        .resolve_photo(&location, PhotoRequest::Automatic)
        .await?;
    describe(&location, &resolution, output)
}
