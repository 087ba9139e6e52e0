//! Configuration management for datahub-catalog.
//!
//! Handles:
//! - Browsing defaults (page size, starting source)
//! - Where flags and the session are stored
//! - Optional dataset document overrides
//! - The login gate

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::dataset::DatasetPaths;
use crate::error::{CatalogError, Result};
use crate::model::DataSource;
use crate::pagination::DEFAULT_PAGE_SIZE;
use crate::util::atomic_write;

/// Application name used for config and data directories.
pub const APP_NAME: &str = "datahub-catalog";

/// Configuration filename.
pub const CONFIG_FILENAME: &str = "config.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Browsing defaults.
    #[serde(default)]
    pub browse: BrowseConfig,
    /// Durable state location.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Dataset document overrides.
    #[serde(default)]
    pub datasets: DatasetPaths,
    /// Login gate.
    #[serde(default)]
    pub auth: AuthConfig,
}

impl Config {
    /// Load configuration from the default location, or defaults if absent.
    pub fn load() -> Result<Self> {
        let config_path = default_config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CatalogError::io(format!("Failed to read config file: {}", path.display()), e)
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| CatalogError::InvalidConfig {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the catalog cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.browse.page_size == 0 {
            return Err(CatalogError::InvalidConfig {
                message: "browse.page_size must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Data directory: configured value, else the platform default.
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.storage.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_data_dir(),
        }
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<()> {
        let config_path = default_config_path()?;
        self.save_to(&config_path)
    }

    /// Save configuration to a specific path.
    ///
    /// The file is written to a temporary sibling first and then renamed
    /// into place.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| CatalogError::InvalidConfig {
            message: format!("Failed to serialize config: {e}"),
        })?;

        atomic_write(path, content.as_bytes())?;

        Ok(())
    }
}

/// Browsing defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowseConfig {
    /// Records per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Source shown when none is given.
    #[serde(default)]
    pub default_source: DataSource,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            default_source: DataSource::default(),
        }
    }
}

/// Durable state location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding `flags.json` and `session.json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

/// Login gate configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Require a login before browsing.
    #[serde(default = "default_true")]
    pub required: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { required: true }
    }
}

// Default value functions for serde
fn default_true() -> bool {
    true
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

/// Get the default configuration path.
pub fn default_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().ok_or_else(|| CatalogError::Unsupported {
        feature: "config directory discovery".to_string(),
    })?;

    Ok(config_dir.join(APP_NAME).join(CONFIG_FILENAME))
}

/// Get the default data directory.
pub fn default_data_dir() -> Result<PathBuf> {
    ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| CatalogError::Unsupported {
            feature: "data directory discovery".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.browse.page_size, 10);
        assert_eq!(config.browse.default_source, DataSource::India);
        assert!(config.auth.required);
        assert!(config.storage.data_dir.is_none());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let parsed: Config = toml::from_str(
            r#"
[browse]
default_source = "imf"

[auth]
required = false
"#,
        )
        .unwrap();
        assert_eq!(parsed.browse.default_source, DataSource::Imf);
        assert_eq!(parsed.browse.page_size, DEFAULT_PAGE_SIZE);
        assert!(!parsed.auth.required);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[browse]\npage_size = 0\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidConfig { .. }));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join(CONFIG_FILENAME);

        let mut config = Config::default();
        config.browse.page_size = 5;
        config.datasets.india = Some(PathBuf::from("/data/india.json"));
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }
}
