//! Hunt Net - HTTP adapters for the hunt ports
//!
//! This crate implements the geocoding, stock-photo and map-rendering ports
//! on top of public web services.

pub mod http;
pub mod nominatim;
pub mod tiles;
pub mod unsplash;

// Re-export main types
pub use nominatim::NominatimGeocoder;
pub use tiles::OsmTileRenderer;
pub use unsplash::UnsplashPhotoSource;
