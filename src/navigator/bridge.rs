//! The boundary to the native side
//!
//! A [`Bridge`] receives a named call with a positional argument list. For
//! synchronous operations it returns the result directly. For asynchronous
//! ones it later invokes exactly one of the two [`Continuation`]s found in
//! the argument list.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::oneshot;

/// Opaque failure payload exactly as the bridge produced it
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeFailure {
    pub payload: Value,
}

impl BridgeFailure {
    pub fn new(payload: impl Into<Value>) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    /// The payload text when the bridge sent a plain string or a `message` field
    pub fn message(&self) -> Option<&str> {
        match &self.payload {
            Value::String(message) => Some(message),
            Value::Object(map) => map.get("message").and_then(Value::as_str),
            _ => None,
        }
    }
}

impl fmt::Display for BridgeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message() {
            Some(message) => f.write_str(message),
            None => write!(f, "{}", self.payload),
        }
    }
}

impl std::error::Error for BridgeFailure {}

/// What a continuation delivers to the waiting caller
pub(crate) type Outcome = Result<Value, BridgeFailure>;

/// Which side of the call a continuation resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinuationKind {
    Success,
    Failure,
}

/// Handle the bridge calls to deliver an asynchronous result.
///
/// The success and failure continuations of one call share a single slot:
/// whichever fires first resolves the call, every later invocation is
/// ignored and reported as `false`.
#[derive(Clone)]
pub struct Continuation {
    kind: ContinuationKind,
    operation: &'static str,
    slot: Arc<Mutex<Option<oneshot::Sender<Outcome>>>>,
}

impl Continuation {
    /// Create the success/failure pair for one call and the receiving end
    pub(crate) fn pair(
        operation: &'static str,
    ) -> (Continuation, Continuation, oneshot::Receiver<Outcome>) {
        let (tx, rx) = oneshot::channel();
        let slot = Arc::new(Mutex::new(Some(tx)));
        let success = Continuation {
            kind: ContinuationKind::Success,
            operation,
            slot: Arc::clone(&slot),
        };
        let failure = Continuation {
            kind: ContinuationKind::Failure,
            operation,
            slot,
        };
        (success, failure, rx)
    }

    pub fn kind(&self) -> ContinuationKind {
        self.kind
    }

    /// Resolve the call with `payload`. Returns false if it was already resolved.
    pub fn invoke(&self, payload: Value) -> bool {
        let Some(tx) = self.slot.lock().take() else {
            tracing::warn!(
                operation = self.operation,
                kind = ?self.kind,
                "Ignoring repeated continuation"
            );
            return false;
        };

        let outcome = match self.kind {
            ContinuationKind::Success => Ok(payload),
            ContinuationKind::Failure => Err(BridgeFailure { payload }),
        };
        // receiver gone means the caller discarded the handle
        let _ = tx.send(outcome);
        true
    }

    /// True once either continuation of the call has fired
    pub fn is_resolved(&self) -> bool {
        self.slot.lock().is_none()
    }
}

impl fmt::Debug for Continuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Continuation")
            .field("kind", &self.kind)
            .field("operation", &self.operation)
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

/// One positional argument of a bridge call
#[derive(Debug, Clone)]
pub enum BridgeArg {
    Value(Value),
    Success(Continuation),
    Failure(Continuation),
}

impl BridgeArg {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            BridgeArg::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_continuation(&self) -> bool {
        !matches!(self, BridgeArg::Value(_))
    }
}

/// A fully laid-out call to the native plugin
#[derive(Debug, Clone)]
pub struct BridgeCall {
    /// Name the plugin is registered under
    pub plugin_ref: String,
    /// Bridge method name
    pub method: &'static str,
    pub args: Vec<BridgeArg>,
    /// True when the result is the return value of [`Bridge::exec`]
    pub sync: bool,
}

impl BridgeCall {
    /// The domain arguments, continuations skipped
    pub fn values(&self) -> Vec<&Value> {
        self.args.iter().filter_map(BridgeArg::as_value).collect()
    }

    pub fn success(&self) -> Option<&Continuation> {
        self.args.iter().find_map(|arg| match arg {
            BridgeArg::Success(c) => Some(c),
            _ => None,
        })
    }

    pub fn failure(&self) -> Option<&Continuation> {
        self.args.iter().find_map(|arg| match arg {
            BridgeArg::Failure(c) => Some(c),
            _ => None,
        })
    }
}

/// The native side of the plugin
pub trait Bridge: Send + Sync {
    /// Whether the plugin is registered with the bridge
    fn is_plugin_installed(&self, _plugin_ref: &str) -> bool {
        true
    }

    /// Dispatch a call.
    ///
    /// Sync calls return their result as `Ok(Some(..))` (or `Ok(None)` for
    /// no value). Async calls return `Ok(None)` and resolve through their
    /// continuations; an `Err` from an async call rejects it immediately.
    fn exec(&self, call: BridgeCall) -> Result<Option<Value>, BridgeFailure>;
}

impl<B: Bridge + ?Sized> Bridge for Arc<B> {
    fn is_plugin_installed(&self, plugin_ref: &str) -> bool {
        (**self).is_plugin_installed(plugin_ref)
    }

    fn exec(&self, call: BridgeCall) -> Result<Option<Value>, BridgeFailure> {
        (**self).exec(call)
    }
}
