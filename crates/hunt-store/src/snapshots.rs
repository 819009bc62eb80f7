//! Per-location map snapshot cache
//!
//! Snapshots are keyed by location identity and live as
//! `documents/maps/<identity>.jpg`. A file on disk is a cache hit; entries
//! never expire.

use hunt_core::config::DEFAULT_SNAPSHOT_SPAN_METERS;
use hunt_core::error::HuntError;
use hunt_core::layout::StorageLayout;
use hunt_core::models::{Coordinates, LocationId};
use hunt_core::ports::{MapRenderer, SnapshotRequest};
use hunt_geo::snapshot_center;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::sync::Arc;

use crate::atomic::write_atomic;

/// Rendered snapshot size in pixels (2x the report's map frame)
pub const SNAPSHOT_WIDTH: u32 = 520;
pub const SNAPSHOT_HEIGHT: u32 = 320;

pub struct SnapshotCache {
    layout: StorageLayout,
    renderer: Arc<dyn MapRenderer>,
    span_meters: f64,
    entries: BTreeMap<LocationId, Vec<u8>>,
}

impl SnapshotCache {
    pub fn new(layout: StorageLayout, renderer: Arc<dyn MapRenderer>) -> Self {
        Self {
            layout,
            renderer,
            span_meters: DEFAULT_SNAPSHOT_SPAN_METERS,
            entries: BTreeMap::new(),
        }
    }

    pub fn with_span_meters(mut self, span_meters: f64) -> Self {
        self.span_meters = span_meters;
        self
    }

    /// Snapshot for a location, rendering and caching it on a miss
    ///
    /// Returns `None` when rendering fails. Nothing is cached in that case,
    /// so a later call retries.
    pub async fn get(&mut self, id: LocationId, coordinates: Coordinates) -> Option<Vec<u8>> {
        if let Some(bytes) = self.cached(&id) {
            tracing::debug!("Snapshot cache hit for {}", id);
            return Some(bytes.to_vec());
        }

        let request = SnapshotRequest {
            center: snapshot_center(coordinates),
            span_meters: self.span_meters,
            width: SNAPSHOT_WIDTH,
            height: SNAPSHOT_HEIGHT,
        };

        let bytes = match self.renderer.render(&request).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("Map snapshot for {} failed: {}", id, e);
                return None;
            }
        };

        let path = self.layout.snapshot_path(&id);
        let written = fs::create_dir_all(self.layout.maps_dir())
            .map_err(HuntError::from)
            .and_then(|()| write_atomic(&path, &bytes));
        match written {
            Ok(()) => {
                tracing::debug!("Cached snapshot for {} at {}", id, path.display());
                self.entries.insert(id, bytes.clone());
            }
            Err(e) => tracing::warn!("Could not cache snapshot for {}: {}", id, e),
        }

        Some(bytes)
    }

    /// Cached snapshot without rendering, read from disk when needed
    pub fn cached(&mut self, id: &LocationId) -> Option<&[u8]> {
        if !self.entries.contains_key(id) {
            match fs::read(self.layout.snapshot_path(id)) {
                Ok(bytes) => {
                    self.entries.insert(*id, bytes);
                }
                Err(e) if e.kind() == ErrorKind::NotFound => return None,
                Err(e) => {
                    tracing::warn!("Could not read cached snapshot for {}: {}", id, e);
                    return None;
                }
            }
        }
        self.entries.get(id).map(Vec::as_slice)
    }

    /// Snapshots loaded or rendered so far in this session
    pub fn entries(&self) -> &BTreeMap<LocationId, Vec<u8>> {
        &self.entries
    }
}
