//! Hunt Geo - Coordinate validation, map regions and tile math
//!
//! This crate handles the geospatial arithmetic behind search filtering and
//! map snapshot rendering.

pub mod mercator;
pub mod region;
pub mod validation;

pub use mercator::{TileCoord, Viewport, TILE_SIZE};
pub use region::Region;
pub use validation::{is_searchable, snapshot_center, FALLBACK_CENTER};
