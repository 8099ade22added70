//! Configuration management for device storage
//!
//! Selects the platform backend and the permission provider, and supplies
//! the directory overrides the special-folder lookup falls back on.

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::platform::SpecialDirectory;

/// Host platform whose folder layout is emulated
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKind {
    #[default]
    Desktop,
    Android,
    Apple,
}

/// Where storage permission answers come from
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PermissionMode {
    #[default]
    Granted,
    Denied,
    Prompt,
}

/// Complete storage configuration
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Folder layout to resolve well-known folders against
    pub platform: PlatformKind,

    /// Permission provider used by the gate
    pub permission: PermissionMode,

    /// Override for the user home directory
    /// Environment: DEVICE_STORAGE_HOME
    pub home: Option<String>,

    /// External storage root (android home)
    pub storage_root: Option<String>,

    /// Removable storage mount point (SD card)
    pub removable_root: Option<String>,

    /// System root directory
    pub system_root: Option<String>,

    /// Delete folders together with their contents
    pub recursive_delete: bool,

    /// Per special-directory absolute path overrides, keyed by name
    pub folders: HashMap<String, String>,
}

impl StorageConfig {
    /// Load configuration from device-storage.toml with environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_paths = ["device-storage", "config/device-storage"];

        let mut builder = Config::builder();
        for config_path in &config_paths {
            builder = builder.add_source(File::with_name(config_path).required(false));
        }

        let settings = builder
            .add_source(
                Environment::with_prefix("DEVICE_STORAGE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: StorageConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text, without environment overrides
    pub fn from_toml_str(text: &str) -> Result<Self, config::ConfigError> {
        let settings = Config::builder()
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()?;

        let config: StorageConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), config::ConfigError> {
        let roots = [
            ("home", &self.home),
            ("storage_root", &self.storage_root),
            ("removable_root", &self.removable_root),
            ("system_root", &self.system_root),
        ];
        for (key, value) in roots {
            if let Some(value) = value {
                if value.trim().is_empty() {
                    return Err(config::ConfigError::Message(format!(
                        "{key} cannot be empty"
                    )));
                }
            }
        }

        for (name, path) in &self.folders {
            if name.parse::<SpecialDirectory>().is_err() {
                return Err(config::ConfigError::Message(format!(
                    "unknown folder override: {name}"
                )));
            }
            if !Path::new(path).is_absolute() {
                return Err(config::ConfigError::Message(format!(
                    "folder override {name} must be an absolute path"
                )));
            }
        }

        Ok(())
    }

    /// Folder overrides keyed by their parsed directory kind
    pub fn folder_overrides(&self) -> HashMap<SpecialDirectory, PathBuf> {
        self.folders
            .iter()
            .filter_map(|(name, path)| {
                name.parse::<SpecialDirectory>()
                    .ok()
                    .map(|dir| (dir, PathBuf::from(path)))
            })
            .collect()
    }

    /// Home directory override as PathBuf
    pub fn home_path(&self) -> Option<PathBuf> {
        self.home.as_ref().map(PathBuf::from)
    }
}
