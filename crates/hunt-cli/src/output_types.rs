use chrono::{DateTime, Utc};
use hunt_core::models::{HuntLocation, PhotoInfo, PhotoSource};
use serde::Serialize;
use tabled::Tabled;

/// One search result
#[derive(Debug, Serialize)]
pub struct LocationItem {
    /// 1-based position, as accepted by `--pick`
    pub index: usize,
    pub id: String,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub has_photo: bool,
}

impl LocationItem {
    pub fn new(index: usize, location: &HuntLocation, has_photo: bool) -> Self {
        Self {
            index,
            id: location.id.to_string(),
            name: location.name.clone(),
            address: location.address.clone(),
            latitude: location.latitude,
            longitude: location.longitude,
            has_photo,
        }
    }
}

/// Output for search command
#[derive(Debug, Serialize)]
pub struct SearchOutput {
    pub query: String,
    pub results: Vec<LocationItem>,
}

#[derive(Tabled)]
pub struct LocationRow {
    #[tabled(rename = "#")]
    pub index: usize,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Address")]
    pub address: String,
    #[tabled(rename = "Coordinates")]
    pub coordinates: String,
    #[tabled(rename = "Photo")]
    pub photo: &'static str,
}

impl From<&LocationItem> for LocationRow {
    fn from(item: &LocationItem) -> Self {
        Self {
            index: item.index,
            name: item.name.clone(),
            address: item.address.clone(),
            coordinates: format!("{:.4}, {:.4}", item.latitude, item.longitude),
            photo: if item.has_photo { "yes" } else { "-" },
        }
    }
}

/// Output for attach, fallback and forget
#[derive(Debug, Serialize)]
pub struct PhotoActionOutput {
    pub location: String,
    pub id: String,
    /// "saved", "unchanged", "not_found", "cancelled" or "removed"
    pub outcome: &'static str,
    pub source: Option<PhotoSource>,
}

/// Stored photo listing entry
#[derive(Debug, Serialize)]
pub struct PhotoItem {
    pub id: String,
    pub filename: String,
    pub source: PhotoSource,
    pub date_added: DateTime<Utc>,
    pub address: Option<String>,
    pub size_bytes: usize,
}

impl PhotoItem {
    pub fn new(id: String, info: &PhotoInfo, size_bytes: usize) -> Self {
        Self {
            id,
            filename: info.filename.clone(),
            source: info.source,
            date_added: info.date_added,
            address: info.address.clone(),
            size_bytes,
        }
    }
}

#[derive(Tabled)]
pub struct PhotoRow {
    #[tabled(rename = "Added")]
    pub added: String,
    #[tabled(rename = "Source")]
    pub source: String,
    #[tabled(rename = "Address")]
    pub address: String,
    #[tabled(rename = "File")]
    pub filename: String,
}

impl From<&PhotoItem> for PhotoRow {
    fn from(item: &PhotoItem) -> Self {
        Self {
            added: item.date_added.format("%Y-%m-%d %H:%M").to_string(),
            source: item.source.to_string(),
            address: item.address.clone().unwrap_or_else(|| "-".to_string()),
            filename: item.filename.clone(),
        }
    }
}

/// Output for maps command
#[derive(Debug, Serialize)]
pub struct MapsOutput {
    pub query: String,
    pub locations: usize,
    pub cached: usize,
    pub rendered: usize,
    pub failed: usize,
}

/// Output for export command
#[derive(Debug, Serialize)]
pub struct ExportOutput {
    pub path: String,
    pub pages: usize,
    pub found: usize,
    pub total: usize,
    pub message: String,
}

/// Output for status command
#[derive(Debug, Serialize)]
pub struct StatusOutput {
    pub data_dir: String,
    pub config: Vec<ConfigEntry>,
    pub photos: usize,
    pub snapshots: usize,
    pub reports: usize,
    pub progress: String,
}

#[derive(Debug, Serialize, Tabled)]
pub struct ConfigEntry {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}
