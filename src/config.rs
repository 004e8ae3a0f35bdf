//! Store configuration.
//!
//! Read from `config.json` in the application config directory. Every field
//! has a serde default, so a missing file or a partial one is fine.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ProfileError, Result};

// =============================================================================
// Config Path
// =============================================================================

pub const APP_NAME: &str = "circle-profile";
const CONFIG_FILE: &str = "config.json";

/// Storage key the profile blob lives under.
pub const DEFAULT_STORAGE_KEY: &str = "profile-data";

/// Get the configuration directory path.
/// - Linux: ~/.config/circle-profile/
/// - Windows: %APPDATA%\circle-profile\
pub fn get_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|p| p.join(APP_NAME))
        .ok_or(ProfileError::ConfigDirNotFound)
}

/// Get the full path to the config file.
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join(CONFIG_FILE))
}

// =============================================================================
// Store Config
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    /// Key the profile is persisted under.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Directory holding the stored blobs. Falls back to the config dir.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Pretty-print the persisted JSON.
    #[serde(default = "default_pretty_json")]
    pub pretty_json: bool,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_pretty_json() -> bool {
    true
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            data_dir: None,
            pretty_json: default_pretty_json(),
        }
    }
}

impl StoreConfig {
    /// Directory the file storage should use.
    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => get_config_dir(),
        }
    }
}

/// Load configuration from the default location.
pub fn load_config() -> Result<StoreConfig> {
    load_config_from(&get_config_path()?)
}

/// Load configuration from `path`, returning defaults if it does not exist.
pub fn load_config_from(path: &Path) -> Result<StoreConfig> {
    if !path.exists() {
        log::debug!("No config at {}, using defaults", path.display());
        return Ok(StoreConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ProfileError::Config(format!("Failed to read config: {}", e)))?;

    serde_json::from_str(&content)
        .map_err(|e| ProfileError::Config(format!("Failed to parse config: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, StoreConfig::default());
        assert_eq!(config.storage_key, "profile-data");
        assert!(config.pretty_json);
    }

    #[test]
    fn test_partial_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "prettyJson": false }"#).unwrap();

        let config = load_config_from(&path).unwrap();
        assert!(!config.pretty_json);
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_malformed_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ nope").unwrap();

        assert!(matches!(
            load_config_from(&path),
            Err(ProfileError::Config(_))
        ));
    }

    #[test]
    fn test_explicit_data_dir() {
        let config = StoreConfig {
            data_dir: Some(PathBuf::from("/tmp/profiles")),
            ..Default::default()
        };
        assert_eq!(
            config.resolve_data_dir().unwrap(),
            PathBuf::from("/tmp/profiles")
        );
    }
}
