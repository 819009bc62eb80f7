//! Command implementations

mod attach;
mod export;
mod fallback;
mod forget;
mod maps;
mod photos;
mod search;
mod status;

use anyhow::{Context, Result};
use hunt_core::config::LayeredConfig;
use hunt_core::layout::StorageLayout;
use hunt_core::models::HuntLocation;
use hunt_net::{NominatimGeocoder, OsmTileRenderer, UnsplashPhotoSource};
use hunt_session::{HuntSession, Resolution};
use hunt_store::{PhotoStore, SnapshotCache};
use std::sync::Arc;
use std::time::Duration;

use crate::cli::{Cli, Commands};
use crate::config_loader::{load_config, overrides_from};
use crate::errors;
use crate::output::OutputWriter;
use crate::output_types::PhotoActionOutput;

pub type Session = HuntSession<NominatimGeocoder, UnsplashPhotoSource>;

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let config = load_config(overrides_from(&cli))?;

    match cli.command {
        Commands::Search(args) => search::execute(args, &config, &output).await,
        Commands::Attach(args) => attach::execute(args, &config, &output).await,
        Commands::Fallback(args) => fallback::execute(args, &config, &output).await,
        Commands::Maps(args) => maps::execute(args, &config, &output).await,
        Commands::Export(args) => export::execute(args, &config, &output).await,
        Commands::Photos => photos::execute(&config, &output),
        Commands::Forget(args) => forget::execute(args, &config, &output).await,
        Commands::Status => status::execute(&config, &output),
    }
}

pub fn layout_for(config: &LayeredConfig) -> StorageLayout {
    StorageLayout::new(config.data_dir.value.clone())
}

/// Wire the network adapters and local stores into a session
pub fn open_session(config: &LayeredConfig) -> Result<Session> {
    let user_agent = config.user_agent.value.as_str();
    let geocoder = NominatimGeocoder::new(config.geocoder_url.value.clone(), user_agent)?
        .with_limit(config.search_limit.value)
        .with_country_codes(config.country_codes.value.clone());
    let stock = UnsplashPhotoSource::new(
        config.stock_photo_url.value.clone(),
        config.unsplash_access_key.value.clone(),
        user_agent,
    )?;
    let renderer = OsmTileRenderer::new(config.tile_url.value.clone(), user_agent)?;

    let layout = layout_for(config);
    let photos = PhotoStore::open(layout.clone()).with_context(|| {
        format!("Failed to open photo store in {}", layout.root().display())
    })?;
    let snapshots = SnapshotCache::new(layout, Arc::new(renderer))
        .with_span_meters(config.snapshot_span_meters.value);

    Ok(HuntSession::new(geocoder, stock, photos, snapshots)
        .with_preload_pause(Duration::from_millis(config.preload_pause_ms.value)))
}

/// Run a search and return the 1-based `pick` among its results
pub async fn pick_location(
    session: &mut Session,
    query: &str,
    pick: usize,
) -> Result<HuntLocation> {
    let locations = session.search(query).await;
    let available = locations.len();
    pick.checked_sub(1)
        .and_then(|index| locations.get(index))
        .cloned()
        .ok_or_else(|| errors::pick_out_of_range(query, pick, available).into())
}

/// Report the outcome of a photo resolution
pub fn describe(
    location: &HuntLocation,
    resolution: &Resolution,
    output: &OutputWriter,
) -> Result<()> {
    if output.is_json() {
        let outcome = match resolution {
            Resolution::Resolved(_) => "saved",
            Resolution::Unchanged => "unchanged",
            Resolution::NotFound => "not_found",
            Resolution::Cancelled => "cancelled",
        };
        return output.result(PhotoActionOutput {
            location: location.name.clone(),
            id: location.id.to_string(),
            outcome,
            source: resolution.source(),
        });
    }

    match resolution {
        Resolution::Resolved(photo) => {
            output.success(format!("Saved photo for {} ({})", location.name, photo.source))
        }
        Resolution::Unchanged => output.info(format!(
            "{} already has a photo; use 'hunt attach' to replace it",
            location.name
        )),
        Resolution::NotFound => {
            output.warning(format!("No stock photo available for {}", location.name))
        }
        Resolution::Cancelled => output.info("No photo supplied; nothing changed"),
    }
    Ok(())
}
