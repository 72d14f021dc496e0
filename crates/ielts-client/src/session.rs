//! Process-wide authentication state.
//!
//! [`SessionGate`] is the only writer of the credential pair apart from the
//! refresh path of [`crate::ApiClient`], which goes through
//! [`SessionGate::apply_refreshed_access`] and [`SessionGate::expire_for`].

use std::sync::Arc;

use ielts_core::{storage_keys, Role};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::router::{Route, Router};
use crate::storage::SessionStorage;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub credentials: Credentials,
    pub role: Option<Role>,
    pub is_loading: bool,
}

impl Session {
    fn loading() -> Self {
        Self {
            credentials: Credentials::default(),
            role: None,
            is_loading: true,
        }
    }

    fn signed_out() -> Self {
        Self {
            credentials: Credentials::default(),
            role: None,
            is_loading: false,
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.credentials.access_token.is_some()
    }
}

pub struct SessionGate {
    storage: Arc<dyn SessionStorage>,
    router: Arc<Router>,
    state: watch::Sender<Session>,
}

impl SessionGate {
    /// Creates the gate in the loading state; call [`SessionGate::hydrate`] next.
    pub fn new(storage: Arc<dyn SessionStorage>, router: Arc<Router>) -> Self {
        let (state, _receiver) = watch::channel(Session::loading());
        Self {
            storage,
            router,
            state,
        }
    }

    /// Loads the persisted record. Never fails: unreadable or partial
    /// records resolve to a signed-out session and are left in storage as-is.
    pub fn hydrate(&self) {
        let session = match self.read_record() {
            Some((access, refresh, role)) => {
                debug!(role = %role, "hydrated session from storage");
                Session {
                    credentials: Credentials {
                        access_token: Some(access),
                        refresh_token: Some(refresh),
                    },
                    role: Some(role),
                    is_loading: false,
                }
            }
            None => Session::signed_out(),
        };
        self.state.send_replace(session);
    }

    pub fn login(&self, access: &str, refresh: &str, role: Role) {
        for (key, value) in [
            (storage_keys::ACCESS_TOKEN, access),
            (storage_keys::REFRESH_TOKEN, refresh),
            (storage_keys::USER_ROLE, role.as_str()),
        ] {
            if let Err(err) = self.storage.set(key, value) {
                warn!(key, "failed to persist session: {err}");
            }
        }
        self.state.send_replace(Session {
            credentials: Credentials {
                access_token: Some(access.to_string()),
                refresh_token: Some(refresh.to_string()),
            },
            role: Some(role),
            is_loading: false,
        });
        info!(role = %role, "signed in");
    }

    pub fn logout(&self) {
        self.clear();
        info!("signed out");
        self.router.push(Route::Login);
    }

    /// Drops the session after the backend rejected it, redirecting to
    /// login unless already there.
    pub fn expire(&self) {
        self.clear();
        info!("session expired");
        if self.router.current() != Route::Login {
            self.router.replace(Route::Login);
        }
    }

    /// Expires the session only if it still holds `refresh_token`; a newer
    /// login that happened meanwhile is kept.
    pub fn expire_for(&self, refresh_token: &str) {
        if self.refresh_token().as_deref() == Some(refresh_token) {
            self.expire();
        } else {
            debug!("session changed since refresh started; not expiring");
        }
    }

    /// Stores a refreshed access token if the session still holds the
    /// refresh token it was issued for. Returns whether it was applied.
    pub fn apply_refreshed_access(&self, refresh_token: &str, access: &str) -> bool {
        let applied = self.state.send_if_modified(|session| {
            if session.credentials.refresh_token.as_deref() != Some(refresh_token) {
                return false;
            }
            session.credentials.access_token = Some(access.to_string());
            true
        });
        if applied {
            if let Err(err) = self.storage.set(storage_keys::ACCESS_TOKEN, access) {
                warn!("failed to persist refreshed access token: {err}");
            }
        }
        applied
    }

    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.state.borrow().credentials.access_token.clone()
    }

    #[must_use]
    pub fn refresh_token(&self) -> Option<String> {
        self.state.borrow().credentials.refresh_token.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Waits until hydration has completed.
    pub async fn ready(&self) -> Session {
        let mut receiver = self.state.subscribe();
        receiver
            .wait_for(|session| !session.is_loading)
            .await
            .map(|session| session.clone())
            .unwrap_or_else(|_| self.snapshot())
    }

    #[must_use]
    pub fn router(&self) -> &Arc<Router> {
        &self.router
    }

    fn clear(&self) {
        for key in storage_keys::ALL {
            if let Err(err) = self.storage.remove(key) {
                warn!(key, "failed to clear session: {err}");
            }
        }
        self.state.send_replace(Session::signed_out());
    }

    fn read_key(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value.filter(|value| !value.is_empty()),
            Err(err) => {
                warn!(key, "session storage unavailable: {err}");
                None
            }
        }
    }

    fn read_record(&self) -> Option<(String, String, Role)> {
        let access = self.read_key(storage_keys::ACCESS_TOKEN);
        let refresh = self.read_key(storage_keys::REFRESH_TOKEN);
        let role = self.read_key(storage_keys::USER_ROLE);
        match (access, refresh, role) {
            (None, None, None) => None,
            (Some(access), Some(refresh), Some(role)) => match role.parse::<Role>() {
                Ok(role) => Some((access, refresh, role)),
                Err(err) => {
                    warn!("ignoring persisted session: {err}");
                    None
                }
            },
            _ => {
                warn!("ignoring partial persisted session");
                None
            }
        }
    }
}
