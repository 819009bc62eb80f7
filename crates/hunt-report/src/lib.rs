//! Hunt Report - PDF export
//!
//! Lays out a cover page and one page per location that has a photo or a map
//! snapshot. The generator only reads from the photo store and the snapshot
//! cache.

pub mod canvas;
pub mod generator;
pub mod text;

pub use generator::{Report, ReportGenerator};
