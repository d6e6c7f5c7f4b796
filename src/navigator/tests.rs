//! Tests for the Launch Navigator module

use super::*;
use crate::core::config::NavigatorConfig;
use crate::core::error::NavigatorError;
use parking_lot::Mutex;
use proptest::prelude::*;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// Scripted bridge
// ============================================================================

/// How the fake answers asynchronous calls
#[derive(Debug, Clone)]
enum AsyncReply {
    Succeed(Value),
    Fail(Value),
    /// Fire success, then failure
    Both(Value),
    /// Keep the continuations for the test to fire later
    Hold,
    /// Drop the continuations without firing
    Drop,
    /// Return an error from `exec` itself
    Throw(Value),
}

#[derive(Debug, Clone, PartialEq)]
enum Slot {
    Value(Value),
    Success,
    Failure,
}

#[derive(Debug, Clone)]
struct RecordedCall {
    plugin_ref: String,
    method: &'static str,
    sync: bool,
    slots: Vec<Slot>,
}

impl RecordedCall {
    fn values(&self) -> Vec<Value> {
        self.slots
            .iter()
            .filter_map(|s| match s {
                Slot::Value(v) => Some(v.clone()),
                _ => None,
            })
            .collect()
    }
}

struct ScriptedBridge {
    installed: bool,
    async_reply: Mutex<AsyncReply>,
    calls: Mutex<Vec<RecordedCall>>,
    held: Mutex<Vec<(Continuation, Continuation)>>,
    /// Result of the `Both` mode's second invocation
    late_invocation: Mutex<Option<bool>>,
}

impl ScriptedBridge {
    fn new(reply: AsyncReply) -> Arc<Self> {
        Arc::new(Self {
            installed: true,
            async_reply: Mutex::new(reply),
            calls: Mutex::new(Vec::new()),
            held: Mutex::new(Vec::new()),
            late_invocation: Mutex::new(None),
        })
    }

    fn not_installed() -> Arc<Self> {
        Arc::new(Self {
            installed: false,
            async_reply: Mutex::new(AsyncReply::Succeed(Value::Null)),
            calls: Mutex::new(Vec::new()),
            held: Mutex::new(Vec::new()),
            late_invocation: Mutex::new(None),
        })
    }

    fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    fn take_held(&self) -> (Continuation, Continuation) {
        self.held.lock().remove(0)
    }
}

fn str_arg(call: &BridgeCall, index: usize) -> String {
    call.values()
        .get(index)
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}

/// Capability matrix modelled on the native plugin
fn answer_sync(call: &BridgeCall) -> Result<Option<Value>, BridgeFailure> {
    let app = str_arg(call, 0);
    let platform = str_arg(call, 1);

    let platform_apps = |platform: &str| -> Option<Vec<&'static str>> {
        match platform {
            "android" => Some(vec![
                "google_maps", "citymapper", "uber", "waze", "yandex", "sygic", "here_maps",
                "moovit",
            ]),
            "ios" => Some(vec![
                "apple_maps", "google_maps", "waze", "citymapper", "navigon", "transit_app",
                "yandex", "uber", "tomtom", "sygic", "here_maps", "moovit",
            ]),
            "windows" => Some(vec!["bing_maps"]),
            _ => None,
        }
    };
    let transport_modes = |app: &str, platform: &str| -> Vec<&'static str> {
        match (app, platform) {
            ("google_maps", _) => vec!["driving", "walking", "bicycling", "transit"],
            ("apple_maps", "ios") => vec!["driving", "walking", "transit"],
            ("sygic", _) => vec!["driving", "walking"],
            ("here_maps", _) => vec!["driving", "walking", "transit"],
            ("bing_maps", "windows") => vec!["driving", "walking", "transit"],
            _ => vec![],
        }
    };
    let supported = |app: &str, platform: &str| {
        platform_apps(platform).is_some_and(|apps| apps.iter().any(|a| *a == app))
    };
    let require = |app: &str, platform: &str| {
        if supported(app, platform) {
            Ok(())
        } else {
            Err(BridgeFailure::new(format!("{} is not supported on {}", app, platform)))
        }
    };

    let reply = match call.method {
        "getAppDisplayName" => match app.parse::<App>() {
            Ok(App::GoogleMaps) => json!("Google Maps"),
            Ok(App::Uber) => json!("Uber"),
            Ok(App::Waze) => json!("Waze"),
            Ok(known) => json!(known.symbol()),
            Err(_) => return Err(BridgeFailure::new(format!("Unknown app: {}", app))),
        },
        "getAppsForPlatform" => match platform_apps(&app) {
            Some(apps) => json!(apps),
            None => return Err(BridgeFailure::new(format!("Unknown platform: {}", app))),
        },
        "supportsTransportMode" => {
            require(&app, &platform)?;
            json!(!transport_modes(&app, &platform).is_empty())
        }
        "getTransportModes" => {
            require(&app, &platform)?;
            json!(transport_modes(&app, &platform))
        }
        "supportsLaunchMode" => json!(app == "google_maps" && platform == "android"),
        "supportsStart" => json!(supported(&app, &platform) && app != "uber"),
        "supportsStartName" => json!(supported(&app, &platform) && app == "google_maps"),
        "supportsDestName" => json!(supported(&app, &platform) && app != "waze"),
        "userSelect" => return Ok(None),
        other => return Err(BridgeFailure::new(format!("No such method: {}", other))),
    };
    Ok(Some(reply))
}

impl Bridge for ScriptedBridge {
    fn is_plugin_installed(&self, plugin_ref: &str) -> bool {
        self.installed && plugin_ref == "launchnavigator"
    }

    fn exec(&self, call: BridgeCall) -> Result<Option<Value>, BridgeFailure> {
        self.calls.lock().push(RecordedCall {
            plugin_ref: call.plugin_ref.clone(),
            method: call.method,
            sync: call.sync,
            slots: call
                .args
                .iter()
                .map(|arg| match arg {
                    BridgeArg::Value(v) => Slot::Value(v.clone()),
                    BridgeArg::Success(_) => Slot::Success,
                    BridgeArg::Failure(_) => Slot::Failure,
                })
                .collect(),
        });

        if call.sync {
            return answer_sync(&call);
        }

        let success = call.success().cloned().expect("async call without success");
        let failure = call.failure().cloned().expect("async call without failure");
        drop(call);

        match self.async_reply.lock().clone() {
            AsyncReply::Succeed(payload) => {
                success.invoke(payload);
            }
            AsyncReply::Fail(payload) => {
                failure.invoke(payload);
            }
            AsyncReply::Both(payload) => {
                success.invoke(payload.clone());
                *self.late_invocation.lock() = Some(failure.invoke(payload));
            }
            AsyncReply::Hold => self.held.lock().push((success, failure)),
            AsyncReply::Drop => {}
            AsyncReply::Throw(payload) => return Err(BridgeFailure::new(payload)),
        }
        Ok(None)
    }
}

fn navigator(bridge: &Arc<ScriptedBridge>) -> LaunchNavigator<Arc<ScriptedBridge>> {
    LaunchNavigator::new(Arc::clone(bridge))
}

// ============================================================================
// Unit Tests
// ============================================================================

#[test]
fn test_operation_table_matches_enum() {
    for descriptor in OPERATIONS.iter() {
        assert_eq!(descriptor.operation.descriptor(), descriptor);
        assert_eq!(Operation::from_name(descriptor.name), Some(descriptor.operation));
    }
    assert_eq!(Operation::from_name("launch"), None);
}

#[test]
fn test_only_navigation_and_availability_are_async() {
    let async_ops: Vec<Operation> = OPERATIONS
        .iter()
        .filter(|d| !d.is_sync())
        .map(|d| d.operation)
        .collect();

    assert_eq!(
        async_ops,
        vec![Operation::Navigate, Operation::IsAppAvailable, Operation::AvailableApps]
    );
    assert!(Operation::UserSelect.is_sync());
    assert!(Operation::SupportsLaunchMode.is_sync());
}

#[test]
fn test_navigate_continuations_follow_destination() {
    let bridge = ScriptedBridge::new(AsyncReply::Hold);
    let nav = navigator(&bridge);

    let _with_options = nav.navigate("A", Some(NavigationOptions::new().app(App::Waze)));
    let _without_options = nav.navigate("B", None);

    let calls = bridge.calls();
    assert_eq!(
        calls[0].slots,
        vec![
            Slot::Value(json!("A")),
            Slot::Success,
            Slot::Failure,
            Slot::Value(json!({"app": "waze"})),
        ]
    );
    assert_eq!(
        calls[1].slots,
        vec![Slot::Value(json!("B")), Slot::Success, Slot::Failure]
    );
}

#[test]
fn test_appended_continuations() {
    let bridge = ScriptedBridge::new(AsyncReply::Hold);
    let nav = navigator(&bridge);

    let _available = nav.is_app_available(App::Uber);
    let _apps = nav.available_apps();

    let calls = bridge.calls();
    assert_eq!(
        calls[0].slots,
        vec![Slot::Value(json!("uber")), Slot::Success, Slot::Failure]
    );
    assert_eq!(calls[1].slots, vec![Slot::Success, Slot::Failure]);
    assert!(calls.iter().all(|c| !c.sync && c.plugin_ref == "launchnavigator"));
}

#[test]
fn test_place_pads_past_the_end() {
    let descriptor = OperationDescriptor {
        operation: Operation::Navigate,
        name: "navigate",
        arity: 2,
        shape: CallShape::Async {
            success_index: Some(3),
            error_index: Some(4),
        },
    };
    let (success, failure, _rx) = Continuation::pair("navigate");

    let placed = descriptor.place(
        vec![Some(json!("A")), None],
        Some((BridgeArg::Success(success), BridgeArg::Failure(failure))),
    );

    assert_eq!(placed.len(), 5);
    assert_eq!(placed[0].as_value(), Some(&json!("A")));
    assert_eq!(placed[1].as_value(), Some(&Value::Null));
    assert_eq!(placed[2].as_value(), Some(&Value::Null));
    assert!(matches!(placed[3], BridgeArg::Success(_)));
    assert!(matches!(placed[4], BridgeArg::Failure(_)));
}

#[test]
fn test_place_keeps_inner_omitted_argument_as_null() {
    let descriptor = Operation::SupportsStart.descriptor();
    let placed = descriptor.place(vec![None, Some(json!("ios"))], None);

    assert_eq!(placed.len(), 2);
    assert_eq!(placed[0].as_value(), Some(&Value::Null));
    assert!(placed.iter().all(|arg| !arg.is_continuation()));
}

#[tokio::test]
async fn test_navigate_forwards_arguments_and_resolves() {
    let bridge = ScriptedBridge::new(AsyncReply::Succeed(json!("OK")));
    let nav = navigator(&bridge);

    let options = NavigationOptions::new().start("London, ON").app(App::Uber);
    let result = nav.navigate("Toronto, ON", Some(options)).await;

    assert_eq!(result.unwrap(), json!("OK"));
    let calls = bridge.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, "navigate");
    assert_eq!(
        calls[0].values(),
        vec![json!("Toronto, ON"), json!({"start": "London, ON", "app": "uber"})]
    );
}

#[tokio::test]
async fn test_navigate_rejection_is_passed_through() {
    let payload = json!({"code": 3, "message": "Waze is not installed"});
    let bridge = ScriptedBridge::new(AsyncReply::Fail(payload.clone()));
    let nav = navigator(&bridge);

    let err = nav
        .navigate(Destination::lat_lon(43.65, -79.38), Some(NavigationOptions::new().app("waze")))
        .await
        .unwrap_err();

    assert_eq!(err.bridge_failure().map(|f| &f.payload), Some(&payload));
    assert!(err.to_string().contains("Waze is not installed"));
}

#[tokio::test]
async fn test_unknown_identifiers_reach_the_bridge() {
    let bridge = ScriptedBridge::new(AsyncReply::Fail(json!("Unsupported app: teleport")));
    let nav = navigator(&bridge);

    let options = NavigationOptions::new()
        .app("teleport")
        .transport_mode("hovercraft");
    let err = nav.navigate("Toronto, ON", Some(options)).await.unwrap_err();

    assert!(matches!(err, NavigatorError::Rejected { operation: "navigate", .. }));
    assert_eq!(
        bridge.calls()[0].values()[1],
        json!({"app": "teleport", "transportMode": "hovercraft"})
    );
}

#[tokio::test]
async fn test_is_app_available_false_is_success() {
    let bridge = ScriptedBridge::new(AsyncReply::Succeed(json!(false)));
    let nav = navigator(&bridge);

    let available = nav.is_app_available("waze").await;

    assert!(!available.unwrap());
    assert_eq!(bridge.calls()[0].values(), vec![json!("waze")]);
}

#[tokio::test]
async fn test_available_apps_list_reply() {
    let bridge = ScriptedBridge::new(AsyncReply::Succeed(json!(["google_maps", "waze"])));
    let nav = navigator(&bridge);

    let apps = nav.available_apps().await.unwrap();

    assert_eq!(apps, vec!["google_maps".to_string(), "waze".to_string()]);
}

#[tokio::test]
async fn test_available_apps_map_reply() {
    let bridge = ScriptedBridge::new(AsyncReply::Succeed(json!({
        "google_maps": true,
        "waze": false,
        "uber": true,
    })));
    let nav = navigator(&bridge);

    let apps = nav.available_apps().await.unwrap();

    assert_eq!(apps, vec!["google_maps".to_string(), "uber".to_string()]);
}

#[tokio::test]
async fn test_available_apps_round_trip_into_navigate() {
    let bridge = ScriptedBridge::new(AsyncReply::Succeed(json!(["here_maps"])));
    let nav = navigator(&bridge);

    let apps = nav.available_apps().await.unwrap();
    let app = &apps[0];
    assert!(is_known_app(app));

    nav.navigate("Toronto, ON", Some(NavigationOptions::new().app(app)))
        .await
        .unwrap();

    assert_eq!(bridge.calls()[1].values()[1], json!({"app": "here_maps"}));
}

#[test]
fn test_supports_launch_mode_is_synchronous() {
    let bridge = ScriptedBridge::new(AsyncReply::Drop);
    let nav = navigator(&bridge);

    assert!(nav.supports_launch_mode("google_maps", "android").unwrap());
    assert!(!nav.supports_launch_mode(App::GoogleMaps, Platform::Ios).unwrap());

    let calls = bridge.calls();
    assert!(calls[0].sync);
    assert_eq!(calls[0].values(), vec![json!("google_maps"), json!("android")]);
}

#[test]
fn test_user_select_fires_once_without_continuations() {
    let bridge = ScriptedBridge::new(AsyncReply::Drop);
    let nav = navigator(&bridge);

    nav.user_select(
        Destination::coordinates(["43.65", "-79.38"]),
        NavigationOptions::new(),
    )
    .unwrap();

    let calls = bridge.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].sync);
    assert_eq!(calls[0].method, "userSelect");
    assert_eq!(
        calls[0].slots,
        vec![Slot::Value(json!(["43.65", "-79.38"])), Slot::Value(json!({}))]
    );
}

#[test]
fn test_sync_queries() {
    let bridge = ScriptedBridge::new(AsyncReply::Drop);
    let nav = navigator(&bridge);

    assert_eq!(nav.get_app_display_name(App::GoogleMaps).unwrap(), "Google Maps");
    assert_eq!(nav.get_apps_for_platform(Platform::Windows).unwrap(), vec!["bing_maps"]);
    assert!(nav.supports_transport_mode(App::Sygic, Platform::Android).unwrap());
    assert_eq!(
        nav.get_transport_modes(App::Sygic, Platform::Android).unwrap(),
        vec!["driving", "walking"]
    );
    assert!(!nav.supports_start(App::Uber, Platform::Ios).unwrap());
    assert!(nav.supports_start_name(App::GoogleMaps, Platform::Android).unwrap());
    assert!(!nav.supports_dest_name(App::Waze, Platform::Android).unwrap());
}

#[test]
fn test_sync_rejection_is_passed_through() {
    let bridge = ScriptedBridge::new(AsyncReply::Drop);
    let nav = navigator(&bridge);

    let err = nav.get_transport_modes("bing_maps", "android").unwrap_err();

    match err {
        NavigatorError::Rejected { operation, failure } => {
            assert_eq!(operation, "getTransportModes");
            assert_eq!(failure.message(), Some("bing_maps is not supported on android"));
        }
        other => panic!("Expected Rejected, got {:?}", other),
    }
}

#[test]
fn test_sync_reply_of_wrong_shape() {
    let bridge = ScriptedBridge::new(AsyncReply::Drop);
    let nav = navigator(&bridge);

    let err = nav
        .invoke_sync::<bool>(Operation::GetAppDisplayName, vec![Some(json!("uber"))])
        .unwrap_err();

    assert!(matches!(
        err,
        NavigatorError::UnexpectedReply { operation: "getAppDisplayName", .. }
    ));
}

#[test]
fn test_capabilities_aggregate() {
    let bridge = ScriptedBridge::new(AsyncReply::Drop);
    let nav = navigator(&bridge);

    let caps = nav
        .capabilities(&CapabilityQuery::new(App::GoogleMaps, Platform::Android))
        .unwrap();

    assert_eq!(caps.display_name, "Google Maps");
    assert!(caps.transport_mode);
    assert_eq!(caps.transport_modes.len(), 4);
    assert!(caps.launch_mode);
    assert!(caps.start && caps.start_name && caps.dest_name);
    assert_eq!(bridge.calls().len(), 7);
}

#[tokio::test]
async fn test_first_continuation_wins() {
    let bridge = ScriptedBridge::new(AsyncReply::Both(json!(true)));
    let nav = navigator(&bridge);

    let available = nav.is_app_available(App::Waze).await;

    assert!(available.unwrap());
    assert_eq!(*bridge.late_invocation.lock(), Some(false));
}

#[tokio::test]
async fn test_dropped_continuations_resolve_as_failure() {
    let bridge = ScriptedBridge::new(AsyncReply::Drop);
    let nav = navigator(&bridge);

    let err = nav.available_apps().await.unwrap_err();

    assert!(matches!(
        err,
        NavigatorError::ContinuationDropped { operation: "availableApps" }
    ));
}

#[tokio::test]
async fn test_exec_error_rejects_async_call() {
    let bridge = ScriptedBridge::new(AsyncReply::Throw(json!("Class not found")));
    let nav = navigator(&bridge);

    let err = nav.navigate("Toronto, ON", None).await.unwrap_err();

    assert_eq!(
        err.bridge_failure().and_then(BridgeFailure::message),
        Some("Class not found")
    );
}

#[tokio::test]
async fn test_unexpected_async_payload() {
    let bridge = ScriptedBridge::new(AsyncReply::Succeed(json!("maybe")));
    let nav = navigator(&bridge);

    let err = nav.is_app_available(App::Uber).await.unwrap_err();

    assert!(matches!(
        err,
        NavigatorError::UnexpectedReply { operation: "isAppAvailable", .. }
    ));
}

#[tokio::test]
async fn test_resolution_from_another_thread() {
    let bridge = ScriptedBridge::new(AsyncReply::Hold);
    let nav = navigator(&bridge);

    let pending = nav.is_app_available(App::Citymapper);
    let (success, _failure) = bridge.take_held();

    let worker = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(20));
        success.invoke(json!(true))
    });

    assert!(pending.await.unwrap());
    assert!(worker.join().unwrap());
}

#[tokio::test]
async fn test_discarded_handle_does_not_retract_call() {
    let bridge = ScriptedBridge::new(AsyncReply::Hold);
    let nav = navigator(&bridge);

    drop(nav.navigate("Toronto, ON", None));
    let (success, failure) = bridge.take_held();

    assert_eq!(bridge.calls().len(), 1);
    assert!(success.invoke(json!("launched")));
    assert!(failure.is_resolved());
}

#[tokio::test]
async fn test_plugin_not_installed() {
    let bridge = ScriptedBridge::not_installed();
    let nav = navigator(&bridge);

    let err = nav.navigate("Toronto, ON", None).await.unwrap_err();
    assert!(matches!(err, NavigatorError::PluginNotInstalled { .. }));

    let err = nav.supports_start(App::Waze, Platform::Ios).unwrap_err();
    assert!(matches!(err, NavigatorError::PluginNotInstalled { .. }));

    assert!(bridge.calls().is_empty());
}

#[test]
fn test_installation_check_can_be_disabled() {
    let bridge = ScriptedBridge::not_installed();
    let config = NavigatorConfig {
        check_plugin_installed: false,
        ..NavigatorConfig::default()
    };
    let nav = LaunchNavigator::with_config(Arc::clone(&bridge), config);

    assert!(nav.supports_launch_mode("google_maps", "android").unwrap());
    assert_eq!(bridge.calls().len(), 1);
}

#[test]
fn test_plugin_ref_comes_from_config() {
    let bridge = ScriptedBridge::new(AsyncReply::Drop);
    let mut config = NavigatorConfig::default();
    config.plugin.plugin_ref = "navigator2".to_string();
    config.check_plugin_installed = false;
    let nav = LaunchNavigator::with_config(Arc::clone(&bridge), config);

    nav.get_apps_for_platform("ios").unwrap();

    assert_eq!(nav.plugin().plugin_ref, "navigator2");
    assert_eq!(bridge.calls()[0].plugin_ref, "navigator2");
}

// ============================================================================
// Constants and value types
// ============================================================================

#[test]
fn test_app_table() {
    assert_eq!(APP.len(), 14);
    assert_eq!(APP.get("UBER"), Some(&"uber"));
    assert_eq!(APP.get("USER_SELECT"), Some(&"user_select"));
    assert_eq!(APP.get("HERE_MAPS"), Some(&"here_maps"));

    for app in App::ALL {
        assert_eq!(app.as_str().parse::<App>(), Ok(*app));
        assert_eq!(APP.get(app.symbol()), Some(&app.as_str()));
    }
    assert!(App::UserSelect.is_user_select());
}

#[test]
fn test_mode_tables() {
    assert_eq!(TRANSPORT_MODE.len(), 4);
    assert_eq!(TRANSPORT_MODE.get("BICYCLING"), Some(&"bicycling"));
    assert_eq!(LAUNCH_MODE.get("TURN_BY_TURN"), Some(&"turn-by-turn"));
    assert_eq!(TransportMode::default(), TransportMode::Driving);
    assert_eq!(LaunchMode::default().to_string(), "maps");
}

#[test]
fn test_unknown_identifier() {
    let err = "teleport".parse::<App>().unwrap_err();
    assert_eq!(err.kind, "app");
    assert_eq!(err.value, "teleport");
    assert!("flying".parse::<TransportMode>().is_err());
    assert_eq!("ios".parse::<Platform>(), Ok(Platform::Ios));
}

#[test]
fn test_identifier_serde() {
    assert_eq!(serde_json::to_value(App::TransitApp).unwrap(), json!("transit_app"));
    let mode: LaunchMode = serde_json::from_value(json!("turn-by-turn")).unwrap();
    assert_eq!(mode, LaunchMode::TurnByTurn);
    assert!(serde_json::from_value::<Platform>(json!("symbian")).is_err());
}

#[test]
fn test_destination_serialization() {
    assert_eq!(
        serde_json::to_value(Destination::from("Toronto, ON")).unwrap(),
        json!("Toronto, ON")
    );
    assert_eq!(
        serde_json::to_value(Destination::from([43.65, -79.38])).unwrap(),
        json!([43.65, -79.38])
    );
    assert_eq!(
        serde_json::to_value(Destination::coordinates(vec!["1", "2", "3"])).unwrap(),
        json!(["1", "2", "3"])
    );
}

#[test]
fn test_options_serialization() {
    assert_eq!(serde_json::to_value(NavigationOptions::new()).unwrap(), json!({}));

    let options = NavigationOptions::new()
        .app(App::GoogleMaps)
        .destination_name("Bob's House")
        .start((43.0, -79.0))
        .start_name("My House")
        .transport_mode(TransportMode::Transit)
        .enable_debug(true)
        .extra("t", "k")
        .extra("zoom", 12)
        .launch_mode(LaunchMode::TurnByTurn)
        .app_selection_dialog_header("Pick one")
        .app_selection_cancel_button("Never mind");

    assert_eq!(
        serde_json::to_value(options).unwrap(),
        json!({
            "app": "google_maps",
            "destinationName": "Bob's House",
            "start": [43.0, -79.0],
            "startName": "My House",
            "transportMode": "transit",
            "enableDebug": true,
            "extras": {"t": "k", "zoom": 12},
            "launchMode": "turn-by-turn",
            "appSelectionDialogHeader": "Pick one",
            "appSelectionCancelButton": "Never mind",
        })
    );
}

#[test]
fn test_capability_query_typed_access() {
    let query = CapabilityQuery::new("waze", "android");
    assert_eq!(query.known_app(), Some(App::Waze));
    assert_eq!(query.known_platform(), Some(Platform::Android));
    assert_eq!(CapabilityQuery::new("foo", "bar").known_app(), None);
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Every app listed for a platform is a value of the APP table
    #[test]
    fn prop_apps_for_platform_are_known(platform in prop::sample::select(Platform::ALL.to_vec())) {
        let bridge = ScriptedBridge::new(AsyncReply::Drop);
        let nav = navigator(&bridge);

        let apps = nav.get_apps_for_platform(platform).unwrap();

        for app in apps {
            prop_assert!(APP.values().any(|id| *id == app));
        }
    }

    /// Transport modes are a subset of TRANSPORT_MODE and empty when unsupported
    #[test]
    fn prop_transport_modes_subset(
        app in prop::sample::select(App::ALL.to_vec()),
        platform in prop::sample::select(Platform::ALL.to_vec()),
    ) {
        let bridge = ScriptedBridge::new(AsyncReply::Drop);
        let nav = navigator(&bridge);

        if let (Ok(supported), Ok(modes)) = (
            nav.supports_transport_mode(app, platform),
            nav.get_transport_modes(app, platform),
        ) {
            for mode in &modes {
                prop_assert!(is_known_transport_mode(mode));
            }
            if !supported {
                prop_assert!(modes.is_empty());
            }
        }
    }

    /// Exactly one outcome is delivered, and it is the first one fired
    #[test]
    fn prop_exactly_once_resolution(fire_order in prop::collection::vec(any::<bool>(), 1..6)) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let bridge = ScriptedBridge::new(AsyncReply::Hold);
            let nav = navigator(&bridge);

            let pending = nav.is_app_available(App::Moovit);
            let (success, failure) = bridge.take_held();

            let accepted: Vec<bool> = fire_order
                .iter()
                .map(|&fire_success| {
                    if fire_success {
                        success.invoke(json!(true))
                    } else {
                        failure.invoke(json!("cancelled"))
                    }
                })
                .collect();

            prop_assert_eq!(accepted.iter().filter(|&&a| a).count(), 1);
            prop_assert!(accepted[0]);

            let result = pending.await;
            prop_assert_eq!(result.is_ok(), fire_order[0]);
            Ok(())
        })?;
    }
}
