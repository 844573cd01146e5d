//! Settings resolution: defaults, then the settings file, then flags

use std::path::Path;

use calc_core::Mode;
use calc_settings::persistence::load_from_path;
use calc_settings::{create_default_registry, keys, CalculatorSettings, SettingValue};
use tracing::{debug, warn};

use crate::runtime::HostRuntimeError;

/// Build the effective settings.
///
/// Invalid entries in the settings file are skipped with a warning; an
/// unreadable or corrupt file is an error.
pub fn load_settings(
    path: Option<&Path>,
    mode: Option<Mode>,
    width: Option<usize>,
) -> Result<CalculatorSettings, HostRuntimeError> {
    let mut registry = create_default_registry();

    if let Some(path) = path {
        let data = load_from_path(path)?;
        debug!(path = %path.display(), count = data.overrides.len(), "loaded settings overrides");
        for rejected in registry.import_overrides(data.to_overrides()) {
            warn!(error = %rejected, "ignoring settings entry");
        }
    }

    if let Some(mode) = mode {
        let name = mode.as_str().to_ascii_lowercase();
        registry.set_override(keys::START_MODE, SettingValue::String(name))?;
    }
    if let Some(width) = width {
        let width = i64::try_from(width).unwrap_or(i64::MAX);
        registry.set_override(keys::DISPLAY_WIDTH, SettingValue::Integer(width))?;
    }

    debug!(overrides = ?registry.list_overrides(), "resolved settings");
    Ok(CalculatorSettings::from_registry(&registry)?)
}
