//! Settings persistence layer
//!
//! Overrides are stored as versioned JSON. [`load_overrides_safe`] never
//! fails: broken data yields empty overrides.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{SettingKey, SettingValue};

/// Serializable container for settings overrides.
/// BTreeMap keeps the key order stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsOverridesData {
    /// Version of the settings format
    pub version: u32,
    pub overrides: BTreeMap<String, SettingValue>,
}

impl SettingsOverridesData {
    pub const CURRENT_VERSION: u32 = 1;

    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            overrides: BTreeMap::new(),
        }
    }

    pub fn from_overrides(overrides: &BTreeMap<SettingKey, SettingValue>) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            overrides: overrides
                .iter()
                .map(|(key, value)| (key.as_str().to_string(), value.clone()))
                .collect(),
        }
    }

    pub fn to_overrides(&self) -> BTreeMap<SettingKey, SettingValue> {
        self.overrides
            .iter()
            .map(|(key, value)| (SettingKey::new(key.as_str()), value.clone()))
            .collect()
    }
}

impl Default for SettingsOverridesData {
    fn default() -> Self {
        Self::new()
    }
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize settings: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize settings: {0}")]
    DeserializationFailed(String),

    #[error("Unsupported settings version: {0}")]
    UnsupportedVersion(u32),

    #[error("Settings file I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Serializes settings overrides to JSON bytes
pub fn serialize_overrides(data: &SettingsOverridesData) -> PersistenceResult<Vec<u8>> {
    serde_json::to_vec_pretty(data)
        .map_err(|e| PersistenceError::SerializationFailed(e.to_string()))
}

/// Deserializes settings overrides from JSON bytes
pub fn deserialize_overrides(bytes: &[u8]) -> PersistenceResult<SettingsOverridesData> {
    let data: SettingsOverridesData = serde_json::from_slice(bytes)
        .map_err(|e| PersistenceError::DeserializationFailed(e.to_string()))?;

    if data.version != SettingsOverridesData::CURRENT_VERSION {
        return Err(PersistenceError::UnsupportedVersion(data.version));
    }

    Ok(data)
}

/// Attempts to load settings from bytes, falling back to defaults on error
pub fn load_overrides_safe(bytes: &[u8]) -> SettingsOverridesData {
    deserialize_overrides(bytes).unwrap_or_default()
}

/// Reads overrides from a file. A missing file means no overrides.
pub fn load_from_path(path: &Path) -> PersistenceResult<SettingsOverridesData> {
    match fs::read(path) {
        Ok(bytes) => deserialize_overrides(&bytes),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(SettingsOverridesData::new()),
        Err(e) => Err(e.into()),
    }
}

pub fn save_to_path(path: &Path, data: &SettingsOverridesData) -> PersistenceResult<()> {
    let bytes = serialize_overrides(data)?;
    fs::write(path, bytes)?;
    Ok(())
}
