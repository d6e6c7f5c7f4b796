//! Deferred result of an asynchronous bridge call

use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::task::{Context, Poll};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::oneshot;

use super::bridge::Outcome;
use super::descriptor::Operation;
use crate::core::error::{NavigatorError, Result};

/// Turns the raw success payload into the caller's result type
pub(crate) type Decoder<T> = fn(Operation, Value) -> Result<T>;

enum State {
    Waiting(oneshot::Receiver<Outcome>),
    Failed(Option<NavigatorError>),
}

/// Handle to a bridge call that is already in flight.
///
/// The call was dispatched when the handle was created; awaiting it only
/// collects the outcome. Dropping the handle discards the result, the call
/// itself is not retracted.
#[must_use = "the call is already dispatched; await the handle to observe its outcome"]
pub struct PendingCall<T> {
    operation: Operation,
    state: State,
    decode: Decoder<T>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> PendingCall<T> {
    pub(crate) fn waiting(
        operation: Operation,
        rx: oneshot::Receiver<Outcome>,
        decode: Decoder<T>,
    ) -> Self {
        Self {
            operation,
            state: State::Waiting(rx),
            decode,
            _marker: PhantomData,
        }
    }

    /// A handle that resolves to `error` without touching the bridge
    pub(crate) fn failed(operation: Operation, error: NavigatorError) -> Self {
        Self {
            operation,
            state: State::Failed(Some(error)),
            decode: |operation, _| {
                Err(NavigatorError::UnexpectedReply {
                    operation: operation.name(),
                    reason: "call failed before dispatch".to_string(),
                })
            },
            _marker: PhantomData,
        }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }
}

impl<T> Future for PendingCall<T> {
    type Output = Result<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        let name = this.operation.name();

        let outcome = match &mut this.state {
            State::Failed(error) => {
                return Poll::Ready(Err(error.take().unwrap_or(
                    NavigatorError::ContinuationDropped { operation: name },
                )));
            }
            State::Waiting(rx) => match Pin::new(rx).poll(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(outcome) => outcome,
            },
        };

        let result = match outcome {
            Ok(Ok(payload)) => {
                tracing::debug!(operation = name, "Bridge call resolved");
                (this.decode)(this.operation, payload)
            }
            Ok(Err(failure)) => {
                tracing::debug!(operation = name, %failure, "Bridge call rejected");
                Err(NavigatorError::Rejected {
                    operation: name,
                    failure,
                })
            }
            Err(_) => {
                tracing::warn!(operation = name, "Bridge dropped continuations unresolved");
                Err(NavigatorError::ContinuationDropped { operation: name })
            }
        };

        this.state = State::Failed(None);
        Poll::Ready(result)
    }
}

/// Decode a payload with serde
pub(crate) fn decode_json<T: DeserializeOwned>(operation: Operation, payload: Value) -> Result<T> {
    serde_json::from_value(payload).map_err(|e| NavigatorError::UnexpectedReply {
        operation: operation.name(),
        reason: e.to_string(),
    })
}

/// Keep the payload as is
pub(crate) fn decode_raw(_operation: Operation, payload: Value) -> Result<Value> {
    Ok(payload)
}
