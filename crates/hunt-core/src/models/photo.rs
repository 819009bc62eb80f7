use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::location::Coordinates;

/// Where a stored photo came from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhotoSource {
    /// Captured with the device camera
    Camera,
    /// Picked from the photo library
    #[default]
    Library,
    /// Fetched from the stock-photo service by keyword
    StockFallback,
}

impl PhotoSource {
    /// Stable tag used in persisted records and JSON output
    pub fn tag(&self) -> &'static str {
        match self {
            PhotoSource::Camera => "camera",
            PhotoSource::Library => "library",
            PhotoSource::StockFallback => "stock_fallback",
        }
    }
}

impl fmt::Display for PhotoSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PhotoSource::Camera => "Camera",
            PhotoSource::Library => "Library",
            PhotoSource::StockFallback => "Stock photo",
        };
        f.write_str(label)
    }
}

/// Metadata describing a stored photo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoInfo {
    /// File name relative to the documents directory
    pub filename: String,

    /// When the photo was saved
    #[serde(alias = "date")]
    pub date_added: DateTime<Utc>,

    /// Acquisition path
    #[serde(default)]
    pub source: PhotoSource,

    /// Address of the location the photo was taken for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Coordinates of the location the photo was taken for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

/// EXIF orientation of a captured image (tag 0x0112, values 1..=8)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Orientation {
    #[default]
    Up,
    UpMirrored,
    Down,
    DownMirrored,
    LeftMirrored,
    Right,
    RightMirrored,
    Left,
}

impl Orientation {
    pub fn from_exif(value: u32) -> Option<Self> {
        match value {
            1 => Some(Orientation::Up),
            2 => Some(Orientation::UpMirrored),
            3 => Some(Orientation::Down),
            4 => Some(Orientation::DownMirrored),
            5 => Some(Orientation::LeftMirrored),
            6 => Some(Orientation::Right),
            7 => Some(Orientation::RightMirrored),
            8 => Some(Orientation::Left),
            _ => None,
        }
    }

    pub fn exif_value(&self) -> u32 {
        match self {
            Orientation::Up => 1,
            Orientation::UpMirrored => 2,
            Orientation::Down => 3,
            Orientation::DownMirrored => 4,
            Orientation::LeftMirrored => 5,
            Orientation::Right => 6,
            Orientation::RightMirrored => 7,
            Orientation::Left => 8,
        }
    }
}

/// Which camera captured a photo
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CameraFacing {
    Front,
    #[default]
    Rear,
}
