//! Identifier tables understood by the native plugin
//!
//! The string values are part of the wire contract with the navigation apps
//! and must not change.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Unknown identifier passed to a `FromStr` impl
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind} identifier: {value}")]
pub struct UnknownIdentifier {
    pub kind: &'static str,
    pub value: String,
}

/// Defines a string-backed identifier enum with its symbolic-name table.
macro_rules! identifier_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $symbol:literal : $id:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every variant, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Identifier sent over the bridge
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $id),+
                }
            }

            /// Symbolic constant name, e.g. `GOOGLE_MAPS`
            pub const fn symbol(&self) -> &'static str {
                match self {
                    $($name::$variant => $symbol),+
                }
            }

            fn table() -> BTreeMap<&'static str, &'static str> {
                Self::ALL.iter().map(|v| (v.symbol(), v.as_str())).collect()
            }
        }

        impl FromStr for $name {
            type Err = UnknownIdentifier;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($id => Ok($name::$variant),)+
                    _ => Err(UnknownIdentifier { kind: $kind, value: s.to_string() }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

identifier_enum! {
    /// Navigation apps the plugin knows how to launch
    App, "app" {
        UserSelect => "USER_SELECT": "user_select",
        AppleMaps => "APPLE_MAPS": "apple_maps",
        GoogleMaps => "GOOGLE_MAPS": "google_maps",
        Waze => "WAZE": "waze",
        Citymapper => "CITYMAPPER": "citymapper",
        Navigon => "NAVIGON": "navigon",
        TransitApp => "TRANSIT_APP": "transit_app",
        Yandex => "YANDEX": "yandex",
        Uber => "UBER": "uber",
        Tomtom => "TOMTOM": "tomtom",
        BingMaps => "BING_MAPS": "bing_maps",
        Sygic => "SYGIC": "sygic",
        HereMaps => "HERE_MAPS": "here_maps",
        Moovit => "MOOVIT": "moovit",
    }
}

identifier_enum! {
    /// Means of travel for the route
    TransportMode, "transport mode" {
        Driving => "DRIVING": "driving",
        Walking => "WALKING": "walking",
        Bicycling => "BICYCLING": "bicycling",
        Transit => "TRANSIT": "transit",
    }
}

identifier_enum! {
    /// How Google Maps opens on Android
    LaunchMode, "launch mode" {
        Maps => "MAPS": "maps",
        TurnByTurn => "TURN_BY_TURN": "turn-by-turn",
    }
}

identifier_enum! {
    /// Platforms capability queries can be asked about
    Platform, "platform" {
        Android => "ANDROID": "android",
        Ios => "IOS": "ios",
        Windows => "WINDOWS": "windows",
    }
}

impl App {
    /// True for the sentinel that asks the user to pick an app
    pub fn is_user_select(&self) -> bool {
        matches!(self, App::UserSelect)
    }
}

impl Default for TransportMode {
    fn default() -> Self {
        TransportMode::Driving
    }
}

impl Default for LaunchMode {
    fn default() -> Self {
        LaunchMode::Maps
    }
}

lazy_static::lazy_static! {
    /// Symbolic name to app identifier, e.g. `UBER` -> `uber`
    pub static ref APP: BTreeMap<&'static str, &'static str> = App::table();

    /// Symbolic name to transport mode identifier
    pub static ref TRANSPORT_MODE: BTreeMap<&'static str, &'static str> = TransportMode::table();

    /// Symbolic name to launch mode identifier
    pub static ref LAUNCH_MODE: BTreeMap<&'static str, &'static str> = LaunchMode::table();
}

/// True if `id` is one of the values of [`APP`]
pub fn is_known_app(id: &str) -> bool {
    id.parse::<App>().is_ok()
}

/// True if `id` is one of the values of [`TRANSPORT_MODE`]
pub fn is_known_transport_mode(id: &str) -> bool {
    id.parse::<TransportMode>().is_ok()
}
