//! Configuration module for LaunchNavigator
//!
//! Handles:
//! - Which native plugin the facade targets
//! - Whether plugin presence is checked before dispatch
//! - Logging preferences

use std::path::{Path, PathBuf};

use ::config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::logging::LoggingConfig;

/// Prefix for environment overrides, e.g. `LAUNCH_NAVIGATOR__PLUGIN__PLUGIN_REF`
pub const ENV_PREFIX: &str = "LAUNCH_NAVIGATOR";

/// Identity of the native plugin behind the bridge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginMeta {
    /// Package id of the native plugin
    pub id: String,

    /// Name the bridge registers the plugin under
    pub plugin_ref: String,

    /// Source repository of the native plugin
    pub repo: String,
}

impl Default for PluginMeta {
    fn default() -> Self {
        Self {
            id: "uk.co.workingedge.phonegap.plugin.launchnavigator".to_string(),
            plugin_ref: "launchnavigator".to_string(),
            repo: "https://github.com/dpa99c/phonegap-launch-navigator.git".to_string(),
        }
    }
}

/// Main facade configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigatorConfig {
    /// Native plugin identity
    #[serde(default)]
    pub plugin: PluginMeta,

    /// Fail fast with `PluginNotInstalled` when the bridge lacks the plugin
    #[serde(default = "default_true")]
    pub check_plugin_installed: bool,

    /// Logging preferences for the host process
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_true() -> bool {
    true
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            plugin: PluginMeta::default(),
            check_plugin_installed: true,
            logging: LoggingConfig::default(),
        }
    }
}

impl NavigatorConfig {
    /// Default config file location for the current user
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        ProjectDirs::from("uk.co", "workingedge", "launch-navigator")
            .map(|dirs| dirs.config_dir().join("navigator.toml"))
            .ok_or(ConfigError::NoConfigDirectory)
    }

    /// Load from an optional file, then apply environment overrides.
    ///
    /// A missing file is not an error; every field falls back to its default.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        let config: NavigatorConfig = settings.try_deserialize()?;
        tracing::debug!(
            path = %path.display(),
            plugin = %config.plugin.plugin_ref,
            "Navigator configuration loaded"
        );
        Ok(config)
    }

    /// Load from the default location
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load(&Self::default_path()?)
    }

    /// Load from a file that must exist
    pub fn load_required(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        Self::load(path)
    }
}
