//! `PendingCall` — a cancelable in-flight request.
//!
//! Canceling drops the transport future on its next poll, which closes the
//! underlying connection. A call that has already settled ignores cancellation.

use crate::error::SdkError;

use futures_util::future::{AbortHandle, Abortable, Aborted};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::task::{ready, Context, Poll};

/// `Send` on native targets; no bound on `wasm32`, where futures are local.
#[cfg(not(target_arch = "wasm32"))]
pub trait MaybeSend: Send {}
#[cfg(not(target_arch = "wasm32"))]
impl<T: Send> MaybeSend for T {}

#[cfg(target_arch = "wasm32")]
pub trait MaybeSend {}
#[cfg(target_arch = "wasm32")]
impl<T> MaybeSend for T {}

#[cfg(not(target_arch = "wasm32"))]
type CallFuture<T> = futures_util::future::BoxFuture<'static, Result<T, SdkError>>;
#[cfg(target_arch = "wasm32")]
type CallFuture<T> = futures_util::future::LocalBoxFuture<'static, Result<T, SdkError>>;

const PENDING: u8 = 0;
const RESOLVED: u8 = 1;
const REJECTED: u8 = 2;
const CANCELED: u8 = 3;

/// Lifecycle of a [`PendingCall`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallState {
    Pending,
    Resolved,
    Rejected,
    Canceled,
}

impl CallState {
    fn from_u8(v: u8) -> Self {
        match v {
            RESOLVED => CallState::Resolved,
            REJECTED => CallState::Rejected,
            CANCELED => CallState::Canceled,
            _ => CallState::Pending,
        }
    }

    pub fn is_settled(&self) -> bool {
        !matches!(self, CallState::Pending)
    }
}

struct Shared {
    state: AtomicU8,
    abort: AbortHandle,
}

/// Cancels a [`PendingCall`] from elsewhere (a UI teardown hook, a timer).
#[derive(Clone)]
pub struct CancelHandle {
    shared: Arc<Shared>,
}

impl CancelHandle {
    /// Cancel the call. Returns `false` if it had already settled.
    pub fn cancel(&self) -> bool {
        let won = self
            .shared
            .state
            .compare_exchange(PENDING, CANCELED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if won {
            self.shared.abort.abort();
            tracing::trace!("Pending call canceled");
        }
        won
    }

    pub fn state(&self) -> CallState {
        CallState::from_u8(self.shared.state.load(Ordering::Acquire))
    }

    pub fn is_canceled(&self) -> bool {
        self.state() == CallState::Canceled
    }

    /// Record the final outcome. A cancel that won the race after the inner
    /// future finished still counts.
    fn settle<T>(&self, result: Result<T, SdkError>) -> Result<T, SdkError> {
        let settled = if result.is_ok() { RESOLVED } else { REJECTED };
        match self
            .shared
            .state
            .compare_exchange(PENDING, settled, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => result,
            Err(_) => Err(SdkError::Canceled),
        }
    }
}

impl fmt::Debug for CancelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelHandle")
            .field("state", &self.state())
            .finish()
    }
}

/// An in-flight HTTP exchange resolving to `Result<T, SdkError>`.
///
/// Nothing is sent until the call is polled (awaited or spawned). The state is
/// settled from the final output, after any `map`/`and_then` steps.
#[must_use = "a PendingCall does nothing unless awaited"]
pub struct PendingCall<T> {
    future: CallFuture<T>,
    handle: CancelHandle,
}

impl<T: MaybeSend + 'static> PendingCall<T> {
    pub fn new<F>(future: F) -> Self
    where
        F: Future<Output = Result<T, SdkError>> + MaybeSend + 'static,
    {
        let (abort, registration) = AbortHandle::new_pair();
        let handle = CancelHandle {
            shared: Arc::new(Shared {
                state: AtomicU8::new(PENDING),
                abort,
            }),
        };

        let future = Box::pin(async move {
            match Abortable::new(future, registration).await {
                Ok(result) => result,
                Err(Aborted) => Err(SdkError::Canceled),
            }
        });

        Self { future, handle }
    }

    /// A call that settles with `result` on first poll.
    pub fn ready(result: Result<T, SdkError>) -> Self {
        Self::new(async move { result })
    }

    /// Transform the success value. Shares this call's cancellation.
    pub fn map<U, F>(self, f: F) -> PendingCall<U>
    where
        U: MaybeSend + 'static,
        F: FnOnce(T) -> U + MaybeSend + 'static,
    {
        let PendingCall { future, handle } = self;
        PendingCall {
            future: Box::pin(async move { future.await.map(f) }),
            handle,
        }
    }

    /// Transform the success value with a fallible step.
    pub fn and_then<U, F>(self, f: F) -> PendingCall<U>
    where
        U: MaybeSend + 'static,
        F: FnOnce(T) -> Result<U, SdkError> + MaybeSend + 'static,
    {
        let PendingCall { future, handle } = self;
        PendingCall {
            future: Box::pin(async move { future.await.and_then(f) }),
            handle,
        }
    }
}

impl<T> PendingCall<T> {
    pub fn cancel(&self) -> bool {
        self.handle.cancel()
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.handle.clone()
    }

    pub fn state(&self) -> CallState {
        self.handle.state()
    }

    pub fn is_canceled(&self) -> bool {
        self.handle.is_canceled()
    }
}

impl<T> Future for PendingCall<T> {
    type Output = Result<T, SdkError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let result = ready!(self.future.as_mut().poll(cx));
        Poll::Ready(self.handle.settle(result))
    }
}

impl<T> fmt::Debug for PendingCall<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingCall")
            .field("state", &self.state())
            .finish()
    }
}
