//! LaunchNavigator Core Module
//!
//! Configuration and error types shared by the facade and the logging system.

pub mod config;
pub mod error;


// Re-export commonly used items
pub use self::config::{NavigatorConfig, PluginMeta, ENV_PREFIX};
pub use self::error::{ConfigError, NavigatorError, Result};
