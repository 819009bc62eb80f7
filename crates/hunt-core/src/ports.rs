//! Port trait definitions
//!
//! These traits define the interfaces that the network adapters implement.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Coordinates, HuntLocation};

/// Port for free-text place search
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Search for places matching the query, in the service's ranking order
    async fn search(&self, query: &str) -> Result<Vec<HuntLocation>>;

    /// Human readable service name for diagnostics
    fn service_name(&self) -> &str;
}

/// Port for keyword-based stock photos
#[async_trait]
pub trait StockPhotoSource: Send + Sync {
    /// Fetch the encoded bytes of one photo matching the keyword.
    /// `Ok(None)` means the service answered but had nothing to offer.
    async fn fetch_photo(&self, keyword: &str) -> Result<Option<Vec<u8>>>;
}

/// A rendered map request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapshotRequest {
    /// Centre of the map, also where the marker is drawn
    pub center: Coordinates,

    /// Width and height of the shown region in meters
    pub span_meters: f64,

    /// Output size in pixels
    pub width: u32,
    pub height: u32,
}

/// Port for static map rendering
#[async_trait]
pub trait MapRenderer: Send + Sync {
    /// Render the requested region and return encoded JPEG bytes
    async fn render(&self, request: &SnapshotRequest) -> Result<Vec<u8>>;
}
