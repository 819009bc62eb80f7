//! Local photo store
//!
//! One JPEG per location identity under the documents directory, plus two
//! whole-blob mappings: identity -> filename (`photo_files.json`) and
//! identity -> [`PhotoInfo`] (the `photo_info` preference).

use chrono::Utc;
use hunt_core::error::{HuntError, Result};
use hunt_core::imaging::{self, JPEG_QUALITY};
use hunt_core::layout::{StorageLayout, PHOTO_INFO_KEY};
use hunt_core::models::{Coordinates, LocationId, PhotoInfo, PhotoSource};
use image::DynamicImage;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::atomic::write_atomic;
use crate::preferences::PreferencesStore;

/// A photo held by the store: encoded JPEG bytes and their metadata
#[derive(Debug, Clone, PartialEq)]
pub struct StoredPhoto {
    pub bytes: Vec<u8>,
    pub info: PhotoInfo,
}

type PhotoInfoMap = BTreeMap<LocationId, PhotoInfo>;

pub struct PhotoStore {
    layout: StorageLayout,
    preferences: PreferencesStore,
    files: BTreeMap<LocationId, String>,
    infos: PhotoInfoMap,
    photos: BTreeMap<LocationId, StoredPhoto>,
}

impl PhotoStore {
    /// Open the store rooted at `layout` and load everything on disk
    pub fn open(layout: StorageLayout) -> Result<Self> {
        layout.ensure()?;
        let preferences = PreferencesStore::new(layout.preferences_dir());
        let mut store = Self {
            layout,
            preferences,
            files: BTreeMap::new(),
            infos: BTreeMap::new(),
            photos: BTreeMap::new(),
        };
        store.load_all();
        Ok(store)
    }

    /// Reload every photo from disk, replacing the in-memory state
    ///
    /// Records whose image file is gone are dropped. A missing or unreadable
    /// mapping yields an empty store.
    pub fn load_all(&mut self) -> &BTreeMap<LocationId, StoredPhoto> {
        self.infos = match self.preferences.get::<PhotoInfoMap>(PHOTO_INFO_KEY) {
            Ok(infos) => infos.unwrap_or_default(),
            Err(e) => {
                tracing::warn!("Ignoring unreadable photo metadata: {}", e);
                BTreeMap::new()
            }
        };
        self.files = match read_mapping(&self.layout.photo_files_path()) {
            Ok(files) => files,
            Err(e) => {
                tracing::warn!("Ignoring unreadable photo file mapping: {}", e);
                BTreeMap::new()
            }
        };

        self.photos.clear();
        for (id, info) in &self.infos {
            if !is_plain_filename(&info.filename) {
                tracing::warn!(
                    "Skipping photo {} with unsafe filename '{}'",
                    id,
                    info.filename
                );
                continue;
            }
            match fs::read(self.layout.photo_path(&info.filename)) {
                Ok(bytes) => {
                    let photo = StoredPhoto {
                        bytes,
                        info: info.clone(),
                    };
                    self.photos.insert(*id, photo);
                }
                Err(e) => {
                    tracing::debug!("Dropping photo {} ({}): {}", id, info.filename, e);
                }
            }
        }

        tracing::info!("Loaded {} stored photos", self.photos.len());
        &self.photos
    }

    /// Persist an image for a location, replacing any previous one
    ///
    /// The image is re-encoded as JPEG. Both mappings are rewritten whole
    /// after the image file is in place.
    pub fn save(
        &mut self,
        id: LocationId,
        image: &DynamicImage,
        source: PhotoSource,
        address: Option<String>,
        coordinates: Option<Coordinates>,
    ) -> Result<&StoredPhoto> {
        let bytes = imaging::encode_jpeg(image, JPEG_QUALITY)?;
        let filename = StorageLayout::photo_filename(&id);
        write_atomic(&self.layout.photo_path(&filename), &bytes)?;

        let info = PhotoInfo {
            filename: filename.clone(),
            date_added: Utc::now(),
            source,
            address,
            coordinates,
        };

        let mut files = self.files.clone();
        files.insert(id, filename);
        let mut infos = self.infos.clone();
        infos.insert(id, info.clone());
        self.persist(&files, &infos)?;
        self.files = files;
        self.infos = infos;

        tracing::info!("Saved {} photo for {}", source.tag(), id);
        let photo = StoredPhoto { bytes, info };
        Ok(match self.photos.entry(id) {
            Entry::Occupied(mut slot) => {
                slot.insert(photo);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(photo),
        })
    }

    /// Remove a photo, its metadata and its file; returns whether it existed
    pub fn forget(&mut self, id: &LocationId) -> Result<bool> {
        let existed = self.infos.contains_key(id) || self.files.contains_key(id);
        if !existed {
            return Ok(false);
        }

        let mut files = self.files.clone();
        let filename = files.remove(id);
        let mut infos = self.infos.clone();
        let info = infos.remove(id);
        self.persist(&files, &infos)?;
        self.files = files;
        self.infos = infos;
        self.photos.remove(id);

        let filename = info.map(|i| i.filename).or(filename);
        if let Some(filename) = filename.filter(|f| is_plain_filename(f)) {
            match fs::remove_file(self.layout.photo_path(&filename)) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }

        tracing::info!("Forgot photo for {}", id);
        Ok(true)
    }

    pub fn get(&self, id: &LocationId) -> Option<&StoredPhoto> {
        self.photos.get(id)
    }

    pub fn contains(&self, id: &LocationId) -> bool {
        self.photos.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LocationId, &StoredPhoto)> {
        self.photos.iter()
    }

    pub fn layout(&self) -> &StorageLayout {
        &self.layout
    }

    fn persist(
        &self,
        files: &BTreeMap<LocationId, String>,
        infos: &PhotoInfoMap,
    ) -> Result<()> {
        let raw = serde_json::to_vec_pretty(files)
            .map_err(|e| HuntError::Serialization(e.to_string()))?;
        write_atomic(&self.layout.photo_files_path(), &raw)?;
        self.preferences.set(PHOTO_INFO_KEY, infos)
    }
}

fn read_mapping(path: &Path) -> Result<BTreeMap<LocationId, String>> {
    let raw = match fs::read(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(e) => return Err(e.into()),
    };
    serde_json::from_slice(&raw).map_err(|e| HuntError::decode("photo file mapping", e))
}

/// A bare file name with no directory components
fn is_plain_filename(filename: &str) -> bool {
    Path::new(filename).file_name().and_then(|f| f.to_str()) == Some(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_filename() {
        assert!(is_plain_filename("abc.jpg"));
        assert!(!is_plain_filename("../abc.jpg"));
        assert!(!is_plain_filename("maps/abc.jpg"));
        assert!(!is_plain_filename(""));
    }
}
