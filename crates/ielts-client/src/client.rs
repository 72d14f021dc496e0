//! Authenticated HTTP client.
//!
//! Every request carries the session's access token. A `401` on a request
//! that has not been retried yet triggers (or joins) the single-flight token
//! refresh and replays the request once with the new token.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use ielts_core::{endpoints, TokenRefreshRequest, TokenRefreshResponse};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cancel::CancelToken;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::refresh::{RefreshCoordinator, RefreshOutcome};
use crate::session::SessionGate;

#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    base_url: String,
    gate: Arc<SessionGate>,
    refresh: RefreshCoordinator,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, gate: Arc<SessionGate>) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;
        Ok(Self::with_http_client(http, &config.base_url, gate))
    }

    pub fn with_http_client(http: reqwest::Client, base_url: &str, gate: Arc<SessionGate>) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                http,
                base_url: base_url.trim_end_matches('/').to_string(),
                gate,
                refresh: RefreshCoordinator::default(),
            }),
        }
    }

    #[must_use]
    pub fn gate(&self) -> &Arc<SessionGate> {
        &self.inner.gate
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Whether a token refresh is currently outstanding.
    #[must_use]
    pub fn is_refreshing(&self) -> bool {
        self.inner.refresh.is_refreshing()
    }

    pub fn request(&self, method: Method, path: &str) -> ApiRequest {
        ApiRequest {
            client: self.clone(),
            method,
            path: path.to_string(),
            body: None,
            cancel: None,
            retried: false,
        }
    }

    pub fn get(&self, path: &str) -> ApiRequest {
        self.request(Method::GET, path)
    }

    pub fn post(&self, path: &str) -> ApiRequest {
        self.request(Method::POST, path)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.inner.base_url, path)
    }

    /// The refresh future handed to the coordinator. Owns everything it
    /// touches so it can outlive the request that started it.
    fn refresh_access(
        &self,
        refresh_token: String,
    ) -> impl Future<Output = RefreshOutcome> + Send + 'static {
        let client = self.clone();
        async move {
            info!("access token rejected; refreshing");
            let outcome = client.request_refresh(&refresh_token).await;
            let gate = &client.inner.gate;
            match &outcome {
                Ok(access) => {
                    if !gate.apply_refreshed_access(&refresh_token, access) {
                        debug!("session changed during refresh; new access token not stored");
                    }
                }
                Err(err) => {
                    warn!(error = %err, "token refresh failed; clearing session");
                    gate.expire_for(&refresh_token);
                }
            }
            outcome
        }
    }

    async fn request_refresh(&self, refresh_token: &str) -> RefreshOutcome {
        let url = self.url(endpoints::TOKEN_REFRESH);
        let start = Instant::now();
        let response = self
            .inner
            .http
            .post(&url)
            .json(&TokenRefreshRequest {
                refresh: refresh_token.to_string(),
            })
            .send()
            .await?;
        debug!(
            url = %url,
            status = %response.status(),
            elapsed_ms = start.elapsed().as_millis(),
            "token refresh response"
        );
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        let body: TokenRefreshResponse = response.json().await?;
        Ok(body.access)
    }
}

/// One logical request. Holds its own retry flag: it is replayed at most
/// once after a token refresh.
pub struct ApiRequest {
    client: ApiClient,
    method: Method,
    path: String,
    body: Option<Result<serde_json::Value, ApiError>>,
    cancel: Option<CancelToken>,
    retried: bool,
}

impl ApiRequest {
    #[must_use]
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Self {
        self.body = Some(serde_json::to_value(body).map_err(|err| ApiError::Decode(err.to_string())));
        self
    }

    #[must_use]
    pub fn cancel_on(mut self, token: &CancelToken) -> Self {
        self.cancel = Some(token.clone());
        self
    }

    /// Sends the request and deserializes a successful JSON body.
    pub async fn fetch<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        let cancel = self.cancel.clone();
        let response = self.send().await?;
        let bytes = cancelable(cancel.as_ref(), response.bytes()).await??;
        serde_json::from_slice(&bytes).map_err(|err| ApiError::Decode(err.to_string()))
    }

    /// Sends the request, ignoring any successful body.
    pub async fn execute(self) -> Result<(), ApiError> {
        self.send().await.map(|_| ())
    }

    /// Sends the request; non-success statuses become [`ApiError::Status`].
    pub async fn send(mut self) -> Result<reqwest::Response, ApiError> {
        let body = self.body.take().transpose()?;
        let response = self.dispatch(body.as_ref(), None).await?;
        if response.status() != StatusCode::UNAUTHORIZED || self.retried {
            return check_status(response).await;
        }
        let original = cancelable(self.cancel.as_ref(), ApiError::from_response(response)).await?;
        if self.is_canceled() {
            return Err(ApiError::Canceled);
        }

        let gate = Arc::clone(&self.client.inner.gate);
        let Some(refresh_token) = gate.refresh_token() else {
            info!(url = %self.path, "unauthorized without refresh token; clearing session");
            gate.expire();
            return Err(original);
        };

        self.retried = true;
        let waiter = self
            .client
            .inner
            .refresh
            .join(|| self.client.refresh_access(refresh_token));
        let outcome = cancelable(self.cancel.as_ref(), waiter).await?;
        let token = outcome.unwrap_or(Err(ApiError::RefreshAborted))?;

        let response = self.dispatch(body.as_ref(), Some(&token)).await?;
        check_status(response).await
    }

    fn is_canceled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_canceled)
    }

    async fn dispatch(
        &self,
        body: Option<&serde_json::Value>,
        token: Option<&str>,
    ) -> Result<reqwest::Response, ApiError> {
        if self.is_canceled() {
            return Err(ApiError::Canceled);
        }
        let url = self.client.url(&self.path);
        let mut builder = self.client.inner.http.request(self.method.clone(), &url);
        let access = match token {
            Some(token) => Some(token.to_string()),
            None => self.client.inner.gate.access_token(),
        };
        if let Some(access) = access {
            builder = builder.bearer_auth(access);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }
        debug!(method = %self.method, url = %url, retried = self.retried, "http request");
        let start = Instant::now();
        let response = cancelable(self.cancel.as_ref(), builder.send()).await??;
        debug!(
            method = %self.method,
            url = %url,
            status = %response.status(),
            elapsed_ms = start.elapsed().as_millis(),
            "http response"
        );
        Ok(response)
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(ApiError::from_response(response).await)
    }
}

async fn cancelable<F: Future>(cancel: Option<&CancelToken>, future: F) -> Result<F::Output, ApiError> {
    match cancel {
        None => Ok(future.await),
        Some(token) => tokio::select! {
            biased;
            () = token.canceled() => Err(ApiError::Canceled),
            output = future => Ok(output),
        },
    }
}
