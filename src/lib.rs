//! LaunchNavigator - typed facade over the native launch-navigator plugin
//!
//! This crate provides:
//! - A statically typed surface for launching third-party navigation apps
//! - Capability queries per (app, platform) pair
//! - A data-driven call-shape table mapping each operation onto the bridge
//! - Continuation-to-future adaptation with exactly-once resolution
//! - Configuration loading and structured logging for the host process

pub mod core;
pub mod logging;
pub mod navigator;

// Re-export commonly used items
pub use self::core::config::{NavigatorConfig, PluginMeta};
pub use self::core::error::{ConfigError, NavigatorError, Result};
pub use logging::{LoggingConfig, LoggingSystem};
pub use navigator::{
    App, Bridge, BridgeCall, BridgeFailure, CapabilityQuery, Destination, LaunchMode,
    LaunchNavigator, NavigationOptions, Operation, PendingCall, Platform, TransportMode, APP,
    TRANSPORT_MODE,
};
