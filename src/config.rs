//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/office-party/office-party.toml`
//! 3. Explicit config file (`--config <path>`)
//! 4. Environment variables: `OFFICE_PARTY_*` prefix, `__` for nesting

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::Strategy;

/// Names of the JSON fields holding id, value and parent of a record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FieldNames {
    pub id: String,
    pub value: String,
    pub parent: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            id: "name".into(),
            value: "party-animal-score".into(),
            parent: "boss".into(),
        }
    }
}

/// Raw field names for intermediate parsing (None = not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawFieldNames {
    pub id: Option<String>,
    pub value: Option<String>,
    pub parent: Option<String>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub strategy: Option<Strategy>,
    pub fields: RawFieldNames,
}

impl FieldNames {
    /// Overlay wins where specified.
    pub fn merge(&self, overlay: &RawFieldNames) -> Self {
        Self {
            id: overlay.id.clone().unwrap_or_else(|| self.id.clone()),
            value: overlay.value.clone().unwrap_or_else(|| self.value.clone()),
            parent: overlay.parent.clone().unwrap_or_else(|| self.parent.clone()),
        }
    }
}

/// Unified configuration for office-party.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Solver traversal strategy
    pub strategy: Strategy,
    /// Input record field names
    pub fields: FieldNames,
}

/// Get the XDG config directory for office-party.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "office-party").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("office-party.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Merge overlay config onto self (base); overlay wins where specified.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            strategy: overlay.strategy.unwrap_or(self.strategy),
            fields: self.fields.merge(&overlay.fields),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; it must exist
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config (skipped when absent)
    /// 3. `config_file`
    /// 4. Environment variables: `OFFICE_PARTY_*`
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let global = global_config_path().filter(|path| path.exists());
        Self::load_from(global.as_deref(), config_file)
    }

    /// Same as [`Settings::load`] with an explicit global config path.
    pub fn load_from(
        global_file: Option<&Path>,
        config_file: Option<&Path>,
    ) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_file {
            let raw = load_raw_settings(global_path)?;
            current = current.merge_with(&raw);
        }

        // 3. Explicit config file
        if let Some(path) = config_file {
            if !path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            let raw = load_raw_settings(path)?;
            current = current.merge_with(&raw);
        }

        // 4. Environment variables (explicit override)
        Self::apply_env_overrides(current)
    }

    /// Apply OFFICE_PARTY_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("OFFICE_PARTY")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("strategy") {
            settings.strategy = val.parse().map_err(|message| ApplicationError::Config {
                message: format!("OFFICE_PARTY_STRATEGY: {message}"),
            })?;
        }
        if let Ok(val) = config.get_string("fields.id") {
            settings.fields.id = val;
        }
        if let Ok(val) = config.get_string("fields.value") {
            settings.fields.value = val;
        }
        if let Ok(val) = config.get_string("fields.parent") {
            settings.fields.parent = val;
        }

        Ok(settings)
    }
}

/// Convert config crate error to ApplicationError.
fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
