//! Search Nominatim and render a map snapshot for the first result
//!
//! Requires network access. To run:
//! cargo run -p hunt-net --example geocode -- "bakery toronto" /tmp/map.jpg

use hunt_core::config::{
    DEFAULT_GEOCODER_URL, DEFAULT_SNAPSHOT_SPAN_METERS, DEFAULT_TILE_URL, DEFAULT_USER_AGENT,
};
use hunt_core::ports::{Geocoder, MapRenderer, SnapshotRequest};
use hunt_net::{NominatimGeocoder, OsmTileRenderer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let query = args
        .next()
        .unwrap_or_else(|| "city hall toronto".to_string());
    let out = args.next().unwrap_or_else(|| "map.jpg".to_string());

    let geocoder = NominatimGeocoder::new(DEFAULT_GEOCODER_URL, DEFAULT_USER_AGENT)?
        .with_limit(5)
        .with_country_codes("ca");
    let locations = geocoder.search(&query).await?;

    for (i, location) in locations.iter().enumerate() {
        println!("{}. {} ({})", i + 1, location.name, location.coordinates());
        println!("   {}", location.address);
    }

    let Some(first) = locations.first() else {
        println!("No results for '{}'", query);
        return Ok(());
    };

    let renderer = OsmTileRenderer::new(DEFAULT_TILE_URL, DEFAULT_USER_AGENT)?;
    let request = SnapshotRequest {
        center: first.coordinates(),
        span_meters: DEFAULT_SNAPSHOT_SPAN_METERS,
        width: 520,
        height: 320,
    };
    let jpeg = renderer.render(&request).await?;
    std::fs::write(&out, &jpeg)?;
    println!(
        "\nWrote {} byte map of {} to {}",
        jpeg.len(),
        first.name,
        out
    );
    Ok(())
}
