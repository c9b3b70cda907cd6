//! Settings parser for ragmon.toml

use std::path::{Path, PathBuf};

use ragmon_core::prelude::*;

use super::types::Settings;

const CONFIG_FILENAME: &str = "ragmon.toml";

/// Default settings file location: `<config dir>/ragmon/ragmon.toml`.
pub fn default_settings_path() -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("ragmon").join(CONFIG_FILENAME)
}

/// Load settings from the given path.
///
/// Permissive: a missing file yields defaults silently; an unreadable or
/// invalid file yields defaults with a warning. The console never refuses to
/// start over its own config.
pub fn load_settings(path: &Path) -> Settings {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Invalid settings file {}: {} -- using defaults", path.display(), e);
                Settings::default()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Settings::default(),
        Err(e) => {
            warn!("Could not read {}: {} -- using defaults", path.display(), e);
            Settings::default()
        }
    }
}

/// Write settings to the given path, creating parent directories.
pub fn save_settings(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(settings)
        .map_err(|e| Error::config(format!("failed to serialize settings: {e}")))?;
    std::fs::write(path, content)?;
    Ok(())
}
