//! Key/value store for structured preferences
//!
//! Each key maps to one JSON file `<key>.json` in the preferences directory.
//! Values are always written whole.

use hunt_core::error::{HuntError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::atomic::write_atomic;

#[derive(Debug, Clone)]
pub struct PreferencesStore {
    dir: PathBuf,
}

impl PreferencesStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Read a value; `Ok(None)` when the key was never written
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let raw = match fs::read(self.path_for(key)) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_slice(&raw)
            .map(Some)
            .map_err(|e| HuntError::decode(format!("preference '{}'", key), e))
    }

    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_vec_pretty(value)
            .map_err(|e| HuntError::Serialization(e.to_string()))?;
        fs::create_dir_all(&self.dir)?;
        write_atomic(&self.path_for(key), &raw)
    }
}
