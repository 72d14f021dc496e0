//! Single-flight coordination of access-token refresh.
//!
//! The in-flight flag and the queue of waiting requests live behind one
//! mutex, so "is a refresh running?" and "start one / wait for it" happen
//! atomically. The lock is never held across an `.await`.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::oneshot;
use tracing::debug;

use crate::error::ApiError;

pub(crate) type RefreshOutcome = Result<String, ApiError>;

#[derive(Default)]
struct RefreshState {
    in_flight: bool,
    pending: Vec<oneshot::Sender<RefreshOutcome>>,
}

#[derive(Clone, Default)]
pub(crate) struct RefreshCoordinator {
    state: Arc<Mutex<RefreshState>>,
}

impl RefreshCoordinator {
    pub(crate) fn is_refreshing(&self) -> bool {
        self.lock().in_flight
    }

    /// Waits on the refresh already running, or starts one with `start`.
    ///
    /// `start` is only called by the first caller of a burst. The refresh
    /// runs on its own task, so it completes even if that caller goes away.
    pub(crate) fn join<F, Fut>(&self, start: F) -> oneshot::Receiver<RefreshOutcome>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = RefreshOutcome> + Send + 'static,
    {
        let (sender, receiver) = oneshot::channel();
        let leader = {
            let mut state = self.lock();
            state.pending.push(sender);
            !std::mem::replace(&mut state.in_flight, true)
        };
        if leader {
            let refresh = start();
            let mut settle = SettleOnDrop {
                coordinator: self.clone(),
                outcome: None,
            };
            tokio::spawn(async move {
                settle.outcome = Some(refresh.await);
            });
        } else {
            debug!("token refresh in flight; queued request");
        }
        receiver
    }

    fn settle(&self, outcome: RefreshOutcome) {
        let pending = {
            let mut state = self.lock();
            state.in_flight = false;
            std::mem::take(&mut state.pending)
        };
        debug!(
            waiters = pending.len(),
            ok = outcome.is_ok(),
            "token refresh settled"
        );
        for waiter in pending {
            // A dropped receiver belongs to a canceled request.
            let _ = waiter.send(outcome.clone());
        }
    }

    fn lock(&self) -> MutexGuard<'_, RefreshState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Settles the coordinator on every exit path of the refresh task,
/// including panics and runtime shutdown.
struct SettleOnDrop {
    coordinator: RefreshCoordinator,
    outcome: Option<RefreshOutcome>,
}

impl Drop for SettleOnDrop {
    fn drop(&mut self) {
        let outcome = self.outcome.take().unwrap_or(Err(ApiError::RefreshAborted));
        self.coordinator.settle(outcome);
    }
}
