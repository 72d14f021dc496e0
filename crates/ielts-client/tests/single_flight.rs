mod support;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use ielts_client::{ApiError, CancelToken, Route, SessionStorage};
use ielts_core::{endpoints, storage_keys, Role};
use serde_json::json;
use support::{handler_fn, harness, Handler, Request, Response, ScriptedServer};
use tokio::sync::Notify;

/// Server where the second request's `401` is only sent once the refresh has
/// reached the server, and the refresh answer is held back until both
/// requests were rejected.
#[derive(Default)]
struct Backend {
    refresh_calls: AtomicUsize,
    refresh_started: Notify,
    second_rejected: Notify,
    replays: Mutex<Vec<(String, Option<String>)>>,
    refresh_succeeds: bool,
    hold_refresh: bool,
    second_rejection_sent: Notify,
    release_refresh: Notify,
}

impl Backend {
    fn new(refresh_succeeds: bool) -> Arc<Self> {
        Arc::new(Self {
            refresh_succeeds,
            ..Self::default()
        })
    }

    /// Like [`Backend::new`], but the refresh answer also waits for
    /// `release_refresh`.
    fn held() -> Arc<Self> {
        Arc::new(Self {
            refresh_succeeds: true,
            hold_refresh: true,
            ..Self::default()
        })
    }

    fn handler(self: &Arc<Self>) -> Handler {
        let backend = Arc::clone(self);
        handler_fn(move |request: Request| {
            let backend = Arc::clone(&backend);
            async move { backend.respond(request).await }
        })
    }

    async fn respond(&self, request: Request) -> Response {
        if request.path.ends_with(endpoints::TOKEN_REFRESH) {
            self.refresh_calls.fetch_add(1, Ordering::SeqCst);
            self.refresh_started.notify_one();
            self.second_rejected.notified().await;
            tokio::time::sleep(Duration::from_millis(200)).await;
            if self.hold_refresh {
                self.release_refresh.notified().await;
            }
            return if self.refresh_succeeds {
                Response::json(200, json!({ "access": "a2" }))
            } else {
                Response::json(401, json!({ "detail": "refresh expired" }))
            };
        }

        if request.authorization.as_deref() == Some("Bearer a2") {
            self.replays
                .lock()
                .expect("replays lock")
                .push((request.path.clone(), request.authorization.clone()));
            return Response::json(200, json!([]));
        }

        if request.path.ends_with(endpoints::RESULTS) {
            self.refresh_started.notified().await;
            let response = Response::json(401, json!({ "detail": "access expired" }));
            self.second_rejected.notify_one();
            self.second_rejection_sent.notify_one();
            return response;
        }
        Response::json(401, json!({ "detail": "access expired" }))
    }
}

#[tokio::test]
async fn concurrent_unauthorized_requests_share_one_refresh() {
    let backend = Backend::new(true);
    let server = ScriptedServer::start(backend.handler()).await;
    let h = harness(&server.url, Route::Dashboard);
    h.gate.login("a1", "r1", Role::Student);

    let (first, second) = tokio::join!(
        h.client.get(endpoints::MY_TESTS).fetch::<serde_json::Value>(),
        h.client.get(endpoints::RESULTS).fetch::<serde_json::Value>(),
    );

    assert_eq!(first.expect("first request"), json!([]));
    assert_eq!(second.expect("second request"), json!([]));
    assert_eq!(backend.refresh_calls.load(Ordering::SeqCst), 1);

    let mut replays = backend.replays.lock().expect("replays lock").clone();
    replays.sort();
    assert_eq!(
        replays,
        vec![
            (endpoints::MY_TESTS.to_string(), Some("Bearer a2".to_string())),
            (endpoints::RESULTS.to_string(), Some("Bearer a2".to_string())),
        ]
    );

    assert!(!h.client.is_refreshing());
    assert_eq!(h.gate.access_token().as_deref(), Some("a2"));
    assert_eq!(h.gate.refresh_token().as_deref(), Some("r1"));
    assert_eq!(
        h.storage.get(storage_keys::ACCESS_TOKEN).expect("read"),
        Some("a2".to_string())
    );
    assert_eq!(h.gate.router().current(), Route::Dashboard);
}

#[tokio::test]
async fn failed_refresh_rejects_every_waiting_request() {
    let backend = Backend::new(false);
    let server = ScriptedServer::start(backend.handler()).await;
    let h = harness(&server.url, Route::Dashboard);
    h.gate.login("a1", "r1", Role::Student);

    let (first, second) = tokio::join!(
        h.client.get(endpoints::MY_TESTS).fetch::<serde_json::Value>(),
        h.client.get(endpoints::RESULTS).fetch::<serde_json::Value>(),
    );

    for result in [first, second] {
        let err = result.expect_err("request should fail");
        assert!(err.is_unauthorized());
        assert_eq!(err.user_message(), "refresh expired");
    }
    assert_eq!(backend.refresh_calls.load(Ordering::SeqCst), 1);
    assert!(backend.replays.lock().expect("replays lock").is_empty());

    assert!(!h.client.is_refreshing());
    assert!(!h.gate.snapshot().is_authenticated());
    for key in storage_keys::ALL {
        assert_eq!(h.storage.get(key).expect("read"), None);
    }
    assert_eq!(h.gate.router().current(), Route::Login);
}

#[tokio::test]
async fn next_burst_after_refresh_starts_a_new_refresh() {
    let backend = Backend::new(true);
    let server = ScriptedServer::start(backend.handler()).await;
    let h = harness(&server.url, Route::Dashboard);
    h.gate.login("a1", "r1", Role::Student);

    let (first, second) = tokio::join!(
        h.client.get(endpoints::MY_TESTS).fetch::<serde_json::Value>(),
        h.client.get(endpoints::RESULTS).fetch::<serde_json::Value>(),
    );
    first.expect("first request");
    second.expect("second request");

    // Rotate back to a token the backend rejects.
    h.gate.login("a1", "r2", Role::Student);
    let (first, second) = tokio::join!(
        h.client.get(endpoints::MY_TESTS).fetch::<serde_json::Value>(),
        h.client.get(endpoints::RESULTS).fetch::<serde_json::Value>(),
    );
    first.expect("first request");
    second.expect("second request");

    assert_eq!(backend.refresh_calls.load(Ordering::SeqCst), 2);
    assert_eq!(h.gate.refresh_token().as_deref(), Some("r2"));
}

#[tokio::test]
async fn canceled_waiter_leaves_shared_refresh_running() {
    let backend = Backend::held();
    let server = ScriptedServer::start(backend.handler()).await;
    let h = harness(&server.url, Route::Dashboard);
    h.gate.login("a1", "r1", Role::Student);

    let first = {
        let client = h.client.clone();
        tokio::spawn(async move {
            client
                .get(endpoints::MY_TESTS)
                .fetch::<serde_json::Value>()
                .await
        })
    };
    let cancel = CancelToken::new();
    let second = {
        let client = h.client.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move {
            client
                .get(endpoints::RESULTS)
                .cancel_on(&cancel)
                .fetch::<serde_json::Value>()
                .await
        })
    };

    backend.second_rejection_sent.notified().await;
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(h.client.is_refreshing());
    cancel.cancel();

    let err = second.await.expect("join").expect_err("second request canceled");
    assert!(matches!(err, ApiError::Canceled));
    assert!(h.client.is_refreshing());

    backend.release_refresh.notify_one();
    assert_eq!(first.await.expect("join").expect("first request"), json!([]));

    assert_eq!(backend.refresh_calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        *backend.replays.lock().expect("replays lock"),
        vec![(endpoints::MY_TESTS.to_string(), Some("Bearer a2".to_string()))]
    );
    assert!(!h.client.is_refreshing());
    assert_eq!(h.gate.access_token().as_deref(), Some("a2"));
    assert_eq!(h.gate.router().current(), Route::Dashboard);
}
