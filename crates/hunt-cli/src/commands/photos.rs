//! Photos command implementation

use anyhow::{Context, Result};
use hunt_core::config::LayeredConfig;
use hunt_store::PhotoStore;

use super::layout_for;
use crate::output::OutputWriter;
use crate::output_types::{PhotoItem, PhotoRow};

pub fn execute(config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let layout = layout_for(config);
    let store = PhotoStore::open(layout.clone())
        .with_context(|| format!("Failed to open photo store in {}", layout.root().display()))?;

    let mut items: Vec<PhotoItem> = store
        .iter()
        .map(|(id, photo)| PhotoItem::new(id.to_string(), &photo.info, photo.bytes.len()))
        .collect();
    items.sort_by(|a, b| b.date_added.cmp(&a.date_added));

    if output.is_json() {
        return output.result(items);
    }

    output.section(format!("Stored photos ({})", items.len()));
    output.table(items.iter().map(PhotoRow::from).collect());
    Ok(())
}
