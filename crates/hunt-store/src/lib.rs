//! Hunt Store - Local persistence
//!
//! Photos and their metadata, the structured preferences store, and the
//! per-location map snapshot cache. All state lives under a
//! [`StorageLayout`](hunt_core::layout::StorageLayout).

pub mod atomic;
pub mod photos;
pub mod preferences;
pub mod snapshots;

pub use photos::{PhotoStore, StoredPhoto};
pub use preferences::PreferencesStore;
pub use snapshots::{SnapshotCache, SNAPSHOT_HEIGHT, SNAPSHOT_WIDTH};
