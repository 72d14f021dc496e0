mod support;

use std::sync::Arc;
use std::time::Duration;

use ielts_client::{
    ApiClient, ApiError, CancelToken, ClientConfig, MemoryStorage, Route, Router, SessionGate,
    SessionStorage,
};
use ielts_core::{endpoints, storage_keys, Role};
use mockito::Matcher;
use serde_json::json;
use support::{harness, silent_server, stalled_unauthorized_server};

#[tokio::test]
async fn attaches_current_access_token() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", endpoints::MY_TESTS)
        .match_header("authorization", "Bearer a1")
        .with_status(200)
        .with_body("[]")
        .expect(1)
        .create_async()
        .await;

    let h = harness(&server.url(), Route::MyTests);
    h.gate.login("a1", "r1", Role::Student);
    let body: serde_json::Value = h.client.get(endpoints::MY_TESTS).fetch().await.expect("fetch");

    assert_eq!(body, json!([]));
    mock.assert_async().await;
}

#[tokio::test]
async fn anonymous_requests_carry_no_authorization_header() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", endpoints::OTP_INGEST)
        .match_header("authorization", Matcher::Missing)
        .match_header("content-type", "application/json")
        .with_status(200)
        .with_body("{}")
        .expect(1)
        .create_async()
        .await;

    let h = harness(&server.url(), Route::Login);
    h.client.send_otp("+998901234567").await.expect("send otp");

    mock.assert_async().await;
}

#[tokio::test]
async fn unauthorized_request_is_replayed_once_with_refreshed_token() {
    let mut server = mockito::Server::new_async().await;
    let rejected = server
        .mock("GET", endpoints::MY_TESTS)
        .match_header("authorization", "Bearer a1")
        .with_status(401)
        .with_body(r#"{"detail":"Given token not valid for any token type"}"#)
        .expect(1)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", endpoints::TOKEN_REFRESH)
        .match_header("authorization", Matcher::Missing)
        .match_body(Matcher::Json(json!({ "refresh": "r1" })))
        .with_status(200)
        .with_body(r#"{"access":"a2"}"#)
        .expect(1)
        .create_async()
        .await;
    let replayed = server
        .mock("GET", endpoints::MY_TESTS)
        .match_header("authorization", "Bearer a2")
        .with_status(200)
        .with_body("[]")
        .expect(1)
        .create_async()
        .await;

    let h = harness(&server.url(), Route::MyTests);
    h.gate.login("a1", "r1", Role::Student);
    let body: serde_json::Value = h.client.get(endpoints::MY_TESTS).fetch().await.expect("fetch");

    assert_eq!(body, json!([]));
    rejected.assert_async().await;
    refresh.assert_async().await;
    replayed.assert_async().await;

    assert!(!h.client.is_refreshing());
    assert_eq!(h.gate.access_token().as_deref(), Some("a2"));
    assert_eq!(
        h.storage.get(storage_keys::ACCESS_TOKEN).expect("read"),
        Some("a2".to_string())
    );
    assert_eq!(
        h.storage.get(storage_keys::REFRESH_TOKEN).expect("read"),
        Some("r1".to_string())
    );
    assert_eq!(h.gate.router().current(), Route::MyTests);
}

#[tokio::test]
async fn replayed_request_rejected_again_is_not_refreshed_twice() {
    let mut server = mockito::Server::new_async().await;
    let rejected = server
        .mock("GET", endpoints::RESULTS)
        .with_status(401)
        .with_body(r#"{"detail":"still no"}"#)
        .expect(2)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", endpoints::TOKEN_REFRESH)
        .with_status(200)
        .with_body(r#"{"access":"a2"}"#)
        .expect(1)
        .create_async()
        .await;

    let h = harness(&server.url(), Route::Results);
    h.gate.login("a1", "r1", Role::Student);
    let err = h
        .client
        .get(endpoints::RESULTS)
        .fetch::<serde_json::Value>()
        .await
        .expect_err("second 401 propagates");

    assert!(err.is_unauthorized());
    assert_eq!(err.user_message(), "still no");
    rejected.assert_async().await;
    refresh.assert_async().await;
    assert_eq!(h.gate.access_token().as_deref(), Some("a2"));
}

#[tokio::test]
async fn unauthorized_without_refresh_token_clears_session_and_redirects() {
    let mut server = mockito::Server::new_async().await;
    let rejected = server
        .mock("GET", endpoints::STUDENT_DASHBOARD)
        .match_header("authorization", Matcher::Missing)
        .with_status(401)
        .with_body(r#"{"detail":"Authentication credentials were not provided."}"#)
        .expect(1)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", endpoints::TOKEN_REFRESH)
        .expect(0)
        .create_async()
        .await;

    let h = harness(&server.url(), Route::Dashboard);
    let err = h
        .client
        .student_dashboard(&CancelToken::new())
        .await
        .expect_err("401 propagates");

    assert!(err.is_unauthorized());
    assert_eq!(err.user_message(), "Authentication credentials were not provided.");
    rejected.assert_async().await;
    refresh.assert_async().await;
    assert!(!h.gate.snapshot().is_authenticated());
    assert_eq!(h.gate.router().current(), Route::Login);
}

#[tokio::test]
async fn rejected_refresh_clears_session_and_redirects_to_login() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", endpoints::MY_TESTS)
        .with_status(401)
        .with_body(r#"{"detail":"access expired"}"#)
        .expect(1)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", endpoints::TOKEN_REFRESH)
        .with_status(401)
        .with_body(r#"{"detail":"Token is blacklisted"}"#)
        .expect(1)
        .create_async()
        .await;

    let h = harness(&server.url(), Route::MyTests);
    h.gate.login("a1", "r1", Role::Student);
    let err = h
        .client
        .my_tests(&CancelToken::new())
        .await
        .expect_err("refresh failure propagates");

    assert_eq!(err.user_message(), "Token is blacklisted");
    refresh.assert_async().await;
    assert!(!h.client.is_refreshing());
    assert!(!h.gate.snapshot().is_authenticated());
    for key in storage_keys::ALL {
        assert_eq!(h.storage.get(key).expect("read"), None);
    }
    assert_eq!(h.gate.router().current(), Route::Login);
}

#[tokio::test]
async fn non_unauthorized_errors_pass_through_untouched() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", endpoints::PAYMENTS_TOPUP)
        .with_status(400)
        .with_body(r#"{"amount":["Ensure this value is greater than or equal to 1000."]}"#)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", endpoints::TOKEN_REFRESH)
        .expect(0)
        .create_async()
        .await;

    let h = harness(&server.url(), Route::Payment);
    h.gate.login("a1", "r1", Role::Student);
    let err = h.client.top_up(1_000).await.expect_err("400 propagates");

    assert_eq!(err.status(), Some(reqwest::StatusCode::BAD_REQUEST));
    assert_eq!(
        err.user_message(),
        "Ensure this value is greater than or equal to 1000."
    );
    refresh.assert_async().await;
    assert_eq!(h.gate.access_token().as_deref(), Some("a1"));
    assert_eq!(h.gate.router().current(), Route::Payment);
}

#[tokio::test]
async fn canceled_request_never_reaches_the_backend() {
    let mut server = mockito::Server::new_async().await;
    let dashboard = server
        .mock("GET", endpoints::STUDENT_DASHBOARD)
        .expect(0)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", endpoints::TOKEN_REFRESH)
        .expect(0)
        .create_async()
        .await;

    let h = harness(&server.url(), Route::Dashboard);
    h.gate.login("a1", "r1", Role::Student);
    let cancel = CancelToken::new();
    cancel.cancel();
    let err = h
        .client
        .student_dashboard(&cancel)
        .await
        .expect_err("canceled");

    assert!(matches!(err, ApiError::Canceled));
    dashboard.assert_async().await;
    refresh.assert_async().await;
    assert_eq!(h.gate.access_token().as_deref(), Some("a1"));
    assert_eq!(h.gate.router().current(), Route::Dashboard);
}

#[tokio::test]
async fn canceling_a_slow_request_leaves_session_intact() {
    let url = silent_server().await;
    let h = harness(&url, Route::Dashboard);
    h.gate.login("a1", "r1", Role::Student);

    let cancel = CancelToken::new();
    let request = {
        let client = h.client.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move { client.student_dashboard(&cancel).await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;
    cancel.cancel();

    let err = request.await.expect("join").expect_err("canceled");
    assert!(err.is_canceled());
    assert!(!h.client.is_refreshing());
    assert_eq!(h.gate.access_token().as_deref(), Some("a1"));
}

#[tokio::test]
async fn canceling_while_unauthorized_body_streams_skips_refresh() {
    let (url, refresh_calls) =
        stalled_unauthorized_server(endpoints::TOKEN_REFRESH, Duration::from_millis(300)).await;
    let h = harness(&url, Route::Dashboard);
    h.gate.login("a1", "r1", Role::Student);

    let cancel = CancelToken::new();
    let request = {
        let client = h.client.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move { client.student_dashboard(&cancel).await })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;
    cancel.cancel();

    let err = request.await.expect("join").expect_err("canceled");
    assert!(matches!(err, ApiError::Canceled));

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(refresh_calls.load(std::sync::atomic::Ordering::SeqCst), 0);
    assert!(!h.client.is_refreshing());
    assert!(h.gate.snapshot().is_authenticated());
    assert_eq!(h.gate.access_token().as_deref(), Some("a1"));
    assert_eq!(h.gate.refresh_token().as_deref(), Some("r1"));
}

#[tokio::test]
async fn slow_backend_times_out() {
    let url = silent_server().await;
    let storage = Arc::new(MemoryStorage::new());
    let router = Arc::new(Router::new(Route::Dashboard));
    let gate = Arc::new(SessionGate::new(storage, router));
    gate.hydrate();
    gate.login("a1", "r1", Role::Student);
    let config = ClientConfig::new(url).with_timeout(Duration::from_millis(200));
    let client = ApiClient::new(&config, Arc::clone(&gate)).expect("client");

    let err = client
        .get(endpoints::STUDENT_DASHBOARD)
        .execute()
        .await
        .expect_err("timeout");

    assert!(matches!(err, ApiError::Timeout));
    assert_eq!(
        err.user_message(),
        "The server did not respond in time. Please try again."
    );
    assert!(gate.snapshot().is_authenticated());
}

#[tokio::test]
async fn refresh_result_is_dropped_when_user_signed_in_again_meanwhile() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", endpoints::MY_TESTS)
        .match_header("authorization", "Bearer a1")
        .with_status(401)
        .create_async()
        .await;
    server
        .mock("POST", endpoints::TOKEN_REFRESH)
        .with_status(200)
        .with_body(r#"{"access":"a2"}"#)
        .create_async()
        .await;
    server
        .mock("GET", endpoints::MY_TESTS)
        .match_header("authorization", "Bearer a2")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let h = harness(&server.url(), Route::MyTests);
    h.gate.login("a1", "r1", Role::Student);
    h.client.my_tests(&CancelToken::new()).await.expect("fetch");

    // Session from r1 was refreshed; a later login replaces it entirely.
    h.gate.login("b1", "s1", Role::Teacher);
    assert!(!h.gate.apply_refreshed_access("r1", "stale"));
    assert_eq!(h.gate.access_token().as_deref(), Some("b1"));
}
