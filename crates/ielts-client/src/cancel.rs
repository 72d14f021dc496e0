use std::sync::Arc;

use tokio::sync::watch;

/// Cancellation signal shared between a view and the requests it issues.
///
/// Once canceled, requests carrying the token resolve to
/// [`crate::ApiError::Canceled`] and leave session state untouched.
#[derive(Debug, Clone)]
pub struct CancelToken {
    state: Arc<watch::Sender<bool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        let (sender, _receiver) = watch::channel(false);
        Self {
            state: Arc::new(sender),
        }
    }

    pub fn cancel(&self) {
        self.state.send_replace(true);
    }

    #[must_use]
    pub fn is_canceled(&self) -> bool {
        *self.state.borrow()
    }

    /// Resolves once [`CancelToken::cancel`] has been called.
    pub async fn canceled(&self) {
        let mut receiver = self.state.subscribe();
        // The sender lives as long as `self`, so this only returns on cancel.
        let _ = receiver.wait_for(|canceled| *canceled).await;
    }

    /// Cancels the token when the returned guard is dropped.
    #[must_use]
    pub fn drop_guard(&self) -> CancelGuard {
        CancelGuard {
            token: self.clone(),
        }
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

pub struct CancelGuard {
    token: CancelToken,
}

impl Drop for CancelGuard {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
