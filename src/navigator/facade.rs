//! Typed front of the launch-navigator plugin
//!
//! Every method builds its domain arguments, hands them to one of the two
//! generic dispatch routines together with its [`Operation`], and adapts the
//! bridge's answer. No method validates identifiers or retries.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::bridge::{Bridge, BridgeArg, BridgeCall, Continuation};
use super::descriptor::Operation;
use super::pending::{decode_json, decode_raw, Decoder, PendingCall};
use super::types::{CapabilityQuery, Destination, NavigationOptions};
use crate::core::config::{NavigatorConfig, PluginMeta};
use crate::core::error::{NavigatorError, Result};

/// Everything the plugin reports about one (app, platform) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppCapabilities {
    pub app: String,
    pub platform: String,
    pub display_name: String,
    pub transport_mode: bool,
    pub transport_modes: Vec<String>,
    pub launch_mode: bool,
    pub start: bool,
    pub start_name: bool,
    pub dest_name: bool,
}

/// Reply of `availableApps`: older plugins send a list, newer ones a map
#[derive(Deserialize)]
#[serde(untagged)]
enum AvailableAppsReply {
    List(Vec<String>),
    Map(BTreeMap<String, bool>),
}

fn decode_available_apps(operation: Operation, payload: Value) -> Result<Vec<String>> {
    let reply: AvailableAppsReply = decode_json(operation, payload)?;
    Ok(match reply {
        AvailableAppsReply::List(apps) => apps,
        AvailableAppsReply::Map(apps) => apps
            .into_iter()
            .filter_map(|(app, available)| available.then_some(app))
            .collect(),
    })
}

/// Facade over a [`Bridge`] to the native launch-navigator plugin
pub struct LaunchNavigator<B> {
    bridge: B,
    config: NavigatorConfig,
}

impl<B: Bridge> LaunchNavigator<B> {
    /// Create a facade with default configuration
    pub fn new(bridge: B) -> Self {
        Self::with_config(bridge, NavigatorConfig::default())
    }

    pub fn with_config(bridge: B, config: NavigatorConfig) -> Self {
        Self { bridge, config }
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    pub fn plugin(&self) -> &PluginMeta {
        &self.config.plugin
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    /// Launch a navigation app with directions to `destination`
    pub fn navigate(
        &self,
        destination: impl Into<Destination>,
        options: Option<NavigationOptions>,
    ) -> PendingCall<Value> {
        let op = Operation::Navigate;
        let destination: Destination = destination.into();
        match (encode(op, &destination), options.map(|o| encode(op, &o)).transpose()) {
            (Ok(destination), Ok(options)) => {
                self.dispatch_async(op, vec![Some(destination), options], decode_raw)
            }
            (Err(e), _) | (_, Err(e)) => PendingCall::failed(op, e),
        }
    }

    /// Whether `app` is installed on this device
    pub fn is_app_available(&self, app: impl AsRef<str>) -> PendingCall<bool> {
        self.invoke_async(Operation::IsAppAvailable, vec![Some(text(app))])
    }

    /// Identifiers of the navigation apps installed on this device
    pub fn available_apps(&self) -> PendingCall<Vec<String>> {
        self.dispatch_async(Operation::AvailableApps, Vec::new(), decode_available_apps)
    }

    pub fn get_app_display_name(&self, app: impl AsRef<str>) -> Result<String> {
        self.invoke_sync(Operation::GetAppDisplayName, vec![Some(text(app))])
    }

    /// Apps the plugin supports on `platform`
    pub fn get_apps_for_platform(&self, platform: impl AsRef<str>) -> Result<Vec<String>> {
        self.invoke_sync(Operation::GetAppsForPlatform, vec![Some(text(platform))])
    }

    pub fn supports_transport_mode(
        &self,
        app: impl AsRef<str>,
        platform: impl AsRef<str>,
    ) -> Result<bool> {
        self.query(Operation::SupportsTransportMode, app, platform)
    }

    pub fn get_transport_modes(
        &self,
        app: impl AsRef<str>,
        platform: impl AsRef<str>,
    ) -> Result<Vec<String>> {
        self.query(Operation::GetTransportModes, app, platform)
    }

    /// Currently only Google Maps on Android supports a launch mode
    pub fn supports_launch_mode(
        &self,
        app: impl AsRef<str>,
        platform: impl AsRef<str>,
    ) -> Result<bool> {
        self.query(Operation::SupportsLaunchMode, app, platform)
    }

    pub fn supports_start(&self, app: impl AsRef<str>, platform: impl AsRef<str>) -> Result<bool> {
        self.query(Operation::SupportsStart, app, platform)
    }

    pub fn supports_start_name(
        &self,
        app: impl AsRef<str>,
        platform: impl AsRef<str>,
    ) -> Result<bool> {
        self.query(Operation::SupportsStartName, app, platform)
    }

    pub fn supports_dest_name(
        &self,
        app: impl AsRef<str>,
        platform: impl AsRef<str>,
    ) -> Result<bool> {
        self.query(Operation::SupportsDestName, app, platform)
    }

    /// Show the native app picker for `destination`. Nothing is returned;
    /// the picker launches the chosen app itself.
    pub fn user_select(
        &self,
        destination: impl Into<Destination>,
        options: NavigationOptions,
    ) -> Result<()> {
        let op = Operation::UserSelect;
        let destination: Destination = destination.into();
        let args = vec![Some(encode(op, &destination)?), Some(encode(op, &options)?)];
        self.dispatch_sync(op, args).map(|_| ())
    }

    /// Run every capability query for `query` in one go
    pub fn capabilities(&self, query: &CapabilityQuery) -> Result<AppCapabilities> {
        let (app, platform) = (&query.app, &query.platform);
        Ok(AppCapabilities {
            app: app.clone(),
            platform: platform.clone(),
            display_name: self.get_app_display_name(app)?,
            transport_mode: self.supports_transport_mode(app, platform)?,
            transport_modes: self.get_transport_modes(app, platform)?,
            launch_mode: self.supports_launch_mode(app, platform)?,
            start: self.supports_start(app, platform)?,
            start_name: self.supports_start_name(app, platform)?,
            dest_name: self.supports_dest_name(app, platform)?,
        })
    }

    /// Dispatch an async operation and decode its success payload with serde
    pub fn invoke_async<T: DeserializeOwned>(
        &self,
        op: Operation,
        args: Vec<Option<Value>>,
    ) -> PendingCall<T> {
        self.dispatch_async(op, args, decode_json::<T>)
    }

    /// Dispatch a sync operation and decode its return value with serde
    pub fn invoke_sync<T: DeserializeOwned>(
        &self,
        op: Operation,
        args: Vec<Option<Value>>,
    ) -> Result<T> {
        let reply = self.dispatch_sync(op, args)?;
        decode_json(op, reply.unwrap_or(Value::Null))
    }

    fn query<T: DeserializeOwned>(
        &self,
        op: Operation,
        app: impl AsRef<str>,
        platform: impl AsRef<str>,
    ) -> Result<T> {
        self.invoke_sync(op, vec![Some(text(app)), Some(text(platform))])
    }

    fn ensure_installed(&self, op: Operation) -> Result<()> {
        let plugin_ref = &self.config.plugin.plugin_ref;
        if self.config.check_plugin_installed && !self.bridge.is_plugin_installed(plugin_ref) {
            tracing::warn!(operation = op.name(), plugin = %plugin_ref, "Plugin not installed");
            return Err(NavigatorError::PluginNotInstalled {
                plugin: self.config.plugin.id.clone(),
            });
        }
        Ok(())
    }

    fn dispatch_async<T>(
        &self,
        op: Operation,
        args: Vec<Option<Value>>,
        decode: Decoder<T>,
    ) -> PendingCall<T> {
        if let Err(e) = self.ensure_installed(op) {
            return PendingCall::failed(op, e);
        }

        let descriptor = op.descriptor();
        let (success, failure, rx) = Continuation::pair(descriptor.name);
        let guard = failure.clone();
        let args = descriptor.place(
            args,
            Some((BridgeArg::Success(success), BridgeArg::Failure(failure))),
        );

        tracing::debug!(
            operation = descriptor.name,
            sync = false,
            arg_count = args.len(),
            "Dispatching bridge call"
        );

        let call = BridgeCall {
            plugin_ref: self.config.plugin.plugin_ref.clone(),
            method: descriptor.name,
            args,
            sync: false,
        };
        if let Err(failure) = self.bridge.exec(call) {
            guard.invoke(failure.payload);
        }
        // release our share of the slot so an abandoned call surfaces as dropped
        drop(guard);

        PendingCall::waiting(op, rx, decode)
    }

    fn dispatch_sync(&self, op: Operation, args: Vec<Option<Value>>) -> Result<Option<Value>> {
        self.ensure_installed(op)?;

        let descriptor = op.descriptor();
        let args = descriptor.place(args, None);

        tracing::debug!(
            operation = descriptor.name,
            sync = true,
            arg_count = args.len(),
            "Dispatching bridge call"
        );

        let call = BridgeCall {
            plugin_ref: self.config.plugin.plugin_ref.clone(),
            method: descriptor.name,
            args,
            sync: true,
        };
        self.bridge.exec(call).map_err(|failure| {
            tracing::debug!(operation = descriptor.name, %failure, "Bridge call rejected");
            NavigatorError::Rejected {
                operation: descriptor.name,
                failure,
            }
        })
    }
}

fn text(value: impl AsRef<str>) -> Value {
    Value::String(value.as_ref().to_string())
}

fn encode<T: Serialize>(op: Operation, value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| NavigatorError::Encode {
        operation: op.name(),
        reason: e.to_string(),
    })
}
