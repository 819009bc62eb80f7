//! Status command implementation

use anyhow::Result;
use hunt_core::config::{ConfigSource, LayeredConfig};
use hunt_core::models::found_message;
use hunt_store::PhotoStore;
use std::fs;
use std::path::Path;

use super::layout_for;
use crate::output::OutputWriter;
use crate::output_types::{ConfigEntry, StatusOutput};

pub fn execute(config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let layout = layout_for(config);
    let store = PhotoStore::open(layout.clone())?;

    let photos = store.len();
    let snapshots = count_files(&layout.maps_dir(), |name| name.ends_with(".jpg"));
    let reports = count_files(&layout.documents_dir(), |name| {
        name.starts_with("CityHunt_Report_") && name.ends_with(".pdf")
    });

    let entries: Vec<ConfigEntry> = config
        .to_inspection_map()
        .into_iter()
        .map(|(key, (value, source))| ConfigEntry {
            key,
            value,
            source: source_label(source),
        })
        .collect();

    if output.is_json() {
        return output.result(StatusOutput {
            data_dir: layout.root().display().to_string(),
            config: entries,
            photos,
            snapshots,
            reports,
            progress: found_message(photos),
        });
    }

    output.section("Configuration");
    output.table(entries);

    output.section("Storage");
    output.kv("Data directory", layout.root().display());
    output.kv("Photos", photos);
    output.kv("Map snapshots", snapshots);
    output.kv("Reports", reports);

    output.section("Hunt");
    output.kv("Progress", found_message(photos));
    if config.unsplash_access_key.value.is_none() {
        output.info("Stock photo fallback is off until an Unsplash access key is configured");
    }
    Ok(())
}

fn source_label(source: ConfigSource) -> String {
    match source {
        ConfigSource::Default => "default",
        ConfigSource::File => "file",
        ConfigSource::Environment => "env",
        ConfigSource::Cli => "cli",
    }
    .to_string()
}

/// Number of files in `dir` whose name matches; 0 when the dir is missing
fn count_files(dir: &Path, matches: impl Fn(&str) -> bool) -> usize {
    fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_name().to_str().is_some_and(&matches))
                .count()
        })
        .unwrap_or(0)
}
