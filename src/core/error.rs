//! Error types for LaunchNavigator
//!
//! Every failure the bridge reports is carried verbatim in
//! [`NavigatorError::Rejected`]; the facade never classifies bridge payloads.

use thiserror::Error;

use crate::logging::LoggingError;
use crate::navigator::BridgeFailure;

/// Result type alias for LaunchNavigator operations
pub type Result<T> = std::result::Result<T, NavigatorError>;

/// Main error type for LaunchNavigator
#[derive(Error, Debug)]
pub enum NavigatorError {
    #[error("Plugin not installed: {plugin}")]
    PluginNotInstalled { plugin: String },

    #[error("Bridge rejected {operation}: {failure}")]
    Rejected {
        operation: &'static str,
        failure: BridgeFailure,
    },

    #[error("Bridge dropped the continuations of {operation} without resolving")]
    ContinuationDropped { operation: &'static str },

    #[error("Failed to encode arguments for {operation}: {reason}")]
    Encode {
        operation: &'static str,
        reason: String,
    },

    #[error("Unexpected reply to {operation}: {reason}")]
    UnexpectedReply {
        operation: &'static str,
        reason: String,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),
}

impl NavigatorError {
    /// The bridge payload, when this error is a pass-through rejection
    pub fn bridge_failure(&self) -> Option<&BridgeFailure> {
        match self {
            NavigatorError::Rejected { failure, .. } => Some(failure),
            _ => None,
        }
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Config parse failed: {reason}")]
    ParseFailed { reason: String },

    #[error("No config directory available on this platform")]
    NoConfigDirectory,
}

impl From<::config::ConfigError> for ConfigError {
    fn from(err: ::config::ConfigError) -> Self {
        match &err {
            ::config::ConfigError::NotFound(path) => ConfigError::FileNotFound { path: path.clone() },
            _ => ConfigError::ParseFailed { reason: err.to_string() },
        }
    }
}
