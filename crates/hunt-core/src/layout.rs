//! On-disk layout of the hunt data directory
//!
//! ```text
//! <data_dir>/
//!   hunt.toml
//!   documents/
//!     photo_files.json
//!     <identity>.jpg
//!     maps/<identity>.jpg
//!     CityHunt_Report_<date>.pdf
//!   preferences/
//!     photo_info.json
//! ```

use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::LocationId;

pub const CONFIG_FILE: &str = "hunt.toml";
pub const PHOTO_FILES_FILE: &str = "photo_files.json";
pub const PHOTO_INFO_KEY: &str = "photo_info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    root: PathBuf,
}

impl StorageLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create every directory of the layout
    pub fn ensure(&self) -> Result<()> {
        fs::create_dir_all(self.documents_dir())?;
        fs::create_dir_all(self.preferences_dir())?;
        fs::create_dir_all(self.maps_dir())?;
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    pub fn documents_dir(&self) -> PathBuf {
        self.root.join("documents")
    }

    pub fn preferences_dir(&self) -> PathBuf {
        self.root.join("preferences")
    }

    pub fn maps_dir(&self) -> PathBuf {
        self.documents_dir().join("maps")
    }

    /// Identity -> filename mapping
    pub fn photo_files_path(&self) -> PathBuf {
        self.documents_dir().join(PHOTO_FILES_FILE)
    }

    /// File name of the photo for a location, relative to the documents dir
    pub fn photo_filename(id: &LocationId) -> String {
        format!("{}.jpg", id.file_stem())
    }

    pub fn photo_path(&self, filename: &str) -> PathBuf {
        self.documents_dir().join(filename)
    }

    pub fn snapshot_path(&self, id: &LocationId) -> PathBuf {
        self.maps_dir().join(format!("{}.jpg", id.file_stem()))
    }

    pub fn report_path(&self, date: NaiveDate) -> PathBuf {
        self.documents_dir().join(format!("CityHunt_Report_{}.pdf", date.format("%Y-%m-%d")))
    }
}
