//! Launch Navigator Module
//!
//! Provides:
//! - Identifier tables for apps, transport modes, launch modes and platforms
//! - Request value types (destination, options, capability query)
//! - The per-operation call-shape table and the bridge boundary
//! - The typed facade that dispatches every operation

mod bridge;
mod constants;
mod descriptor;
mod facade;
mod pending;
mod types;

#[cfg(test)]
mod tests;

pub use bridge::{Bridge, BridgeArg, BridgeCall, BridgeFailure, Continuation, ContinuationKind};
pub use constants::{
    is_known_app, is_known_transport_mode, App, LaunchMode, Platform, TransportMode,
    UnknownIdentifier, APP, LAUNCH_MODE, TRANSPORT_MODE,
};
pub use descriptor::{CallShape, Operation, OperationDescriptor, OPERATIONS};
pub use facade::{AppCapabilities, LaunchNavigator};
pub use pending::PendingCall;
pub use types::{CapabilityQuery, Coordinate, Destination, NavigationOptions};
