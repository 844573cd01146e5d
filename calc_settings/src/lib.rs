//! # Calculator Settings
//!
//! A typed settings registry for the calculator host.
//!
//! ## Philosophy
//!
//! - **Typed settings**: every key has a default, and overrides must match its type
//! - **Layered**: read-only defaults + overrides
//! - **Deterministic**: settings are serializable and reproducible
//!
//! ## Example
//!
//! ```ignore
//! use calc_settings::{create_default_registry, keys, CalculatorSettings, SettingValue};
//!
//! let mut registry = create_default_registry();
//! registry.set_override(keys::DISPLAY_WIDTH, SettingValue::Integer(30))?;
//!
//! let settings = CalculatorSettings::from_registry(&registry)?;
//! assert_eq!(settings.display_width, 30);
//! ```

pub mod persistence;

use std::collections::BTreeMap;
use std::fmt;

use calc_core::{KeypadLayout, Mode, CLASSIC_LAYOUT};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Setting key (path-like identifier)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SettingKey(String);

impl SettingKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SettingKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Setting value (strongly typed)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettingValue {
    Integer(i64),
    String(String),
}

impl SettingValue {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            SettingValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            SettingValue::String(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            SettingValue::Integer(_) => "integer",
            SettingValue::String(_) => "string",
        }
    }

    fn same_type(&self, other: &SettingValue) -> bool {
        core::mem::discriminant(self) == core::mem::discriminant(other)
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Integer(v) => write!(f, "{}", v),
            SettingValue::String(v) => write!(f, "{}", v),
        }
    }
}

/// Errors from setting or reading typed settings
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("Unknown setting: {0}")]
    UnknownKey(SettingKey),

    #[error("Setting {key} expects a {expected} value, got {found}")]
    TypeMismatch {
        key: SettingKey,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: SettingKey, value: String },
}

pub type SettingsResult<T> = Result<T, SettingsError>;

/// Settings registry
#[derive(Debug, Clone, Default)]
pub struct SettingsRegistry {
    /// Default settings (read-only)
    defaults: BTreeMap<SettingKey, SettingValue>,
    overrides: BTreeMap<SettingKey, SettingValue>,
}

impl SettingsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_default(&mut self, key: impl Into<SettingKey>, value: SettingValue) {
        self.defaults.insert(key.into(), value);
    }

    /// Sets an override. The key must have a default of the same type.
    pub fn set_override(
        &mut self,
        key: impl Into<SettingKey>,
        value: SettingValue,
    ) -> SettingsResult<()> {
        let key = key.into();
        let default = self
            .defaults
            .get(&key)
            .ok_or_else(|| SettingsError::UnknownKey(key.clone()))?;
        if !default.same_type(&value) {
            return Err(SettingsError::TypeMismatch {
                key,
                expected: default.type_name(),
                found: value.type_name(),
            });
        }
        self.overrides.insert(key, value);
        Ok(())
    }

    /// Gets the effective value (override or default)
    pub fn get(&self, key: &SettingKey) -> Option<&SettingValue> {
        self.overrides.get(key).or_else(|| self.defaults.get(key))
    }

    pub fn list_overrides(&self) -> Vec<SettingKey> {
        self.overrides.keys().cloned().collect()
    }

    /// Exports all overrides for persistence
    pub fn export_overrides(&self) -> BTreeMap<SettingKey, SettingValue> {
        self.overrides.clone()
    }

    /// Replaces the overrides. Entries that `set_override` would reject are
    /// skipped and returned.
    pub fn import_overrides(
        &mut self,
        overrides: BTreeMap<SettingKey, SettingValue>,
    ) -> Vec<SettingsError> {
        self.overrides.clear();
        overrides
            .into_iter()
            .filter_map(|(key, value)| self.set_override(key, value).err())
            .collect()
    }
}

/// Setting keys
pub mod keys {
    pub const START_MODE: &str = "calculator.start_mode";
    pub const DISPLAY_WIDTH: &str = "display.width";
    pub const HISTORY_LIMIT: &str = "history.limit";
    pub const UNDO_LIMIT: &str = "undo.limit";
    pub const KEYPAD_LAYOUT: &str = "keypad.layout";
}

pub const DEFAULT_DISPLAY_WIDTH: usize = 23;

/// Creates a settings registry with the calculator defaults
pub fn create_default_registry() -> SettingsRegistry {
    let mut registry = SettingsRegistry::new();

    registry.register_default(keys::START_MODE, SettingValue::String("basic".into()));
    registry.register_default(
        keys::DISPLAY_WIDTH,
        SettingValue::Integer(DEFAULT_DISPLAY_WIDTH as i64),
    );
    registry.register_default(
        keys::HISTORY_LIMIT,
        SettingValue::Integer(calc_core::session::DEFAULT_HISTORY_LIMIT as i64),
    );
    registry.register_default(
        keys::UNDO_LIMIT,
        SettingValue::Integer(calc_core::session::DEFAULT_UNDO_LIMIT as i64),
    );
    registry.register_default(
        keys::KEYPAD_LAYOUT,
        SettingValue::String(CLASSIC_LAYOUT.name.into()),
    );

    registry
}

/// Typed view over the calculator settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculatorSettings {
    pub start_mode: Mode,
    pub display_width: usize,
    pub history_limit: usize,
    pub undo_limit: usize,
    pub layout: KeypadLayout,
}

impl CalculatorSettings {
    pub fn from_registry(registry: &SettingsRegistry) -> SettingsResult<Self> {
        let mode_name = string_setting(registry, keys::START_MODE)?;
        let start_mode = Mode::from_name(mode_name).ok_or_else(|| SettingsError::InvalidValue {
            key: SettingKey::new(keys::START_MODE),
            value: mode_name.to_string(),
        })?;

        let layout_name = string_setting(registry, keys::KEYPAD_LAYOUT)?;
        let layout =
            KeypadLayout::from_name(layout_name).ok_or_else(|| SettingsError::InvalidValue {
                key: SettingKey::new(keys::KEYPAD_LAYOUT),
                value: layout_name.to_string(),
            })?;

        let display_width = count_setting(registry, keys::DISPLAY_WIDTH)?;
        if display_width == 0 {
            return Err(SettingsError::InvalidValue {
                key: SettingKey::new(keys::DISPLAY_WIDTH),
                value: "0".into(),
            });
        }

        Ok(Self {
            start_mode,
            display_width,
            history_limit: count_setting(registry, keys::HISTORY_LIMIT)?,
            undo_limit: count_setting(registry, keys::UNDO_LIMIT)?,
            layout,
        })
    }
}

impl Default for CalculatorSettings {
    fn default() -> Self {
        Self {
            start_mode: Mode::Basic,
            display_width: DEFAULT_DISPLAY_WIDTH,
            history_limit: calc_core::session::DEFAULT_HISTORY_LIMIT,
            undo_limit: calc_core::session::DEFAULT_UNDO_LIMIT,
            layout: CLASSIC_LAYOUT,
        }
    }
}

fn lookup<'a>(registry: &'a SettingsRegistry, key: &str) -> SettingsResult<&'a SettingValue> {
    registry
        .get(&SettingKey::new(key))
        .ok_or_else(|| SettingsError::UnknownKey(SettingKey::new(key)))
}

fn string_setting<'a>(registry: &'a SettingsRegistry, key: &str) -> SettingsResult<&'a str> {
    let value = lookup(registry, key)?;
    value.as_string().ok_or_else(|| SettingsError::TypeMismatch {
        key: SettingKey::new(key),
        expected: "string",
        found: value.type_name(),
    })
}

/// Non-negative integer setting
fn count_setting(registry: &SettingsRegistry, key: &str) -> SettingsResult<usize> {
    let value = lookup(registry, key)?;
    let n = value.as_integer().ok_or_else(|| SettingsError::TypeMismatch {
        key: SettingKey::new(key),
        expected: "integer",
        found: value.type_name(),
    })?;
    usize::try_from(n).map_err(|_| SettingsError::InvalidValue {
        key: SettingKey::new(key),
        value: n.to_string(),
    })
}
