//! Value types handed to the bridge
//!
//! All of them serialize to the JSON shapes the native plugin reads. None of
//! them validate their contents: identifiers and coordinates are forwarded
//! as given and judged by the plugin.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::constants::{App, Platform};

/// One component of a coordinate pair, numeric or textual
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coordinate {
    Number(f64),
    Text(String),
}

impl From<f64> for Coordinate {
    fn from(value: f64) -> Self {
        Coordinate::Number(value)
    }
}

impl From<&str> for Coordinate {
    fn from(value: &str) -> Self {
        Coordinate::Text(value.to_string())
    }
}

impl From<String> for Coordinate {
    fn from(value: String) -> Self {
        Coordinate::Text(value)
    }
}

/// Where to navigate to (or from)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Destination {
    /// Place name or address, e.g. `"Toronto, ON"`
    Place(String),
    /// `[latitude, longitude]`; the length is not checked here
    Coordinates(Vec<Coordinate>),
}

impl Destination {
    /// A place name or address
    pub fn place(name: impl Into<String>) -> Self {
        Destination::Place(name.into())
    }

    /// A latitude/longitude pair
    pub fn lat_lon(latitude: f64, longitude: f64) -> Self {
        Destination::Coordinates(vec![latitude.into(), longitude.into()])
    }

    /// Coordinates as given, e.g. `["43.65", "-79.38"]`
    pub fn coordinates<I, C>(parts: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Coordinate>,
    {
        Destination::Coordinates(parts.into_iter().map(Into::into).collect())
    }
}

impl From<&str> for Destination {
    fn from(value: &str) -> Self {
        Destination::Place(value.to_string())
    }
}

impl From<String> for Destination {
    fn from(value: String) -> Self {
        Destination::Place(value)
    }
}

impl From<[f64; 2]> for Destination {
    fn from([lat, lon]: [f64; 2]) -> Self {
        Destination::lat_lon(lat, lon)
    }
}

impl From<(f64, f64)> for Destination {
    fn from((lat, lon): (f64, f64)) -> Self {
        Destination::lat_lon(lat, lon)
    }
}

/// Options for `navigate` and `user_select`.
///
/// Unset fields are left out of the payload entirely so the plugin applies
/// its own defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationOptions {
    /// App to launch; unset means the user is asked to choose
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app: Option<String>,

    /// Label shown for the destination, e.g. "Bob's House"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<Destination>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport_mode: Option<String>,

    /// Ask the plugin to emit its own debug output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_debug: Option<bool>,

    /// App-specific parameters passed through untouched, e.g. `{"t": "k"}`
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub extras: BTreeMap<String, Value>,

    /// Android only: `maps` or `turn-by-turn`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub launch_mode: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_selection_dialog_header: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_selection_cancel_button: Option<String>,
}

impl NavigationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts an [`App`] constant or any raw identifier
    pub fn app(mut self, app: impl AsRef<str>) -> Self {
        self.app = Some(app.as_ref().to_string());
        self
    }

    pub fn destination_name(mut self, name: impl Into<String>) -> Self {
        self.destination_name = Some(name.into());
        self
    }

    pub fn start(mut self, start: impl Into<Destination>) -> Self {
        self.start = Some(start.into());
        self
    }

    pub fn start_name(mut self, name: impl Into<String>) -> Self {
        self.start_name = Some(name.into());
        self
    }

    /// Accepts a [`TransportMode`](super::TransportMode) constant or any raw identifier
    pub fn transport_mode(mut self, mode: impl AsRef<str>) -> Self {
        self.transport_mode = Some(mode.as_ref().to_string());
        self
    }

    pub fn enable_debug(mut self, enabled: bool) -> Self {
        self.enable_debug = Some(enabled);
        self
    }

    /// Add one app-specific parameter
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }

    /// Accepts a [`LaunchMode`](super::LaunchMode) constant or any raw identifier
    pub fn launch_mode(mut self, mode: impl AsRef<str>) -> Self {
        self.launch_mode = Some(mode.as_ref().to_string());
        self
    }

    pub fn app_selection_dialog_header(mut self, header: impl Into<String>) -> Self {
        self.app_selection_dialog_header = Some(header.into());
        self
    }

    pub fn app_selection_cancel_button(mut self, label: impl Into<String>) -> Self {
        self.app_selection_cancel_button = Some(label.into());
        self
    }
}

/// An (app, platform) pair for the capability queries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityQuery {
    pub app: String,
    pub platform: String,
}

impl CapabilityQuery {
    pub fn new(app: impl AsRef<str>, platform: impl AsRef<str>) -> Self {
        Self {
            app: app.as_ref().to_string(),
            platform: platform.as_ref().to_string(),
        }
    }

    /// Typed app, if the identifier is a known one
    pub fn known_app(&self) -> Option<App> {
        self.app.parse().ok()
    }

    /// Typed platform, if the identifier is a known one
    pub fn known_platform(&self) -> Option<Platform> {
        self.platform.parse().ok()
    }
}
