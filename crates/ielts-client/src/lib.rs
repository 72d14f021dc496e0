//! Client side of the IELTS platform: session state, authenticated HTTP
//! with single-flight token refresh, and typed endpoint wrappers.

#![deny(clippy::unwrap_used)]

pub mod api;
mod cancel;
mod client;
mod config;
mod error;
mod guard;
mod refresh;
mod router;
mod session;
pub mod storage;

pub use api::{validate_score, validate_topup_amount, SubmissionQueues};
pub use cancel::{CancelGuard, CancelToken};
pub use client::{ApiClient, ApiRequest};
pub use config::{ClientConfig, BASE_URL_ENV, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::ApiError;
pub use guard::{enforce, guard_redirect, spawn_route_guard};
pub use router::{Route, Router};
pub use session::{Credentials, Session, SessionGate};
pub use storage::{FileStorage, KeyringStorage, MemoryStorage, SessionStorage, StorageError};
