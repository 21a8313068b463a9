//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/forestview/forestview.toml`
//! 3. Local config: `<dir>/.forestview.toml`
//! 4. Environment variables: `FORESTVIEW_*` prefix
//!
//! Command line flags are applied on top by the CLI layer.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::services::DEFAULT_TREE_LIMIT;
use crate::application::ApplicationError;

/// Default dump file, relative to the working directory.
pub const DEFAULT_INPUT: &str = "tree.txt";

/// Unified configuration for forestview.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Dump file to read (default: tree.txt)
    pub input: PathBuf,
    /// Number of trees rendered (default: 60)
    pub tree_limit: usize,
    /// Fail on trees with unplaced nodes (default: false)
    pub strict: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            tree_limit: DEFAULT_TREE_LIMIT,
            strict: false,
        }
    }
}

/// Raw settings for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub input: Option<PathBuf>,
    pub tree_limit: Option<usize>,
    pub strict: Option<bool>,
}

/// Get the XDG config directory for forestview.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "forestview").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("forestview.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".forestview.toml")
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

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Overlay config onto self: values present in `overlay` win.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            input: overlay.input.clone().unwrap_or_else(|| self.input.clone()),
            tree_limit: overlay.tree_limit.unwrap_or(self.tree_limit),
            strict: overlay.strict.unwrap_or(self.strict),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding `.forestview.toml`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("config: global {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        // 3. Local config
        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("config: local {}", local_path.display());
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        // 4. Environment variables
        Self::apply_env_overrides(current)
    }

    /// Apply FORESTVIEW_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("FORESTVIEW").try_parsing(true))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("input") {
            settings.input = PathBuf::from(val);
        }
        match config.get::<usize>("tree_limit") {
            Ok(val) => settings.tree_limit = val,
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
        }
        match config.get_bool("strict") {
            Ok(val) => settings.strict = val,
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
        }

        Ok(settings)
    }

    /// Render the settings as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}
