use reqwest::StatusCode;

/// Failure of a backend call as seen by callers of [`crate::ApiClient`].
///
/// `Clone` so that a single refresh outcome can be handed to every request
/// waiting on it.
#[derive(thiserror::Error, Debug, Clone)]
pub enum ApiError {
    #[error("request timed out")]
    Timeout,
    #[error("transport error: {0}")]
    Transport(String),
    #[error("request failed: {status} {body}")]
    Status { status: StatusCode, body: String },
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("request canceled")]
    Canceled,
    #[error("{0}")]
    Validation(String),
    #[error("token refresh did not complete")]
    RefreshAborted,
    #[error("client setup failed: {0}")]
    Setup(String),
}

impl ApiError {
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Self::Status { status, body }
    }

    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    #[must_use]
    pub fn is_canceled(&self) -> bool {
        matches!(self, Self::Canceled)
    }

    /// Human-readable message for display next to the form that failed.
    ///
    /// Backend validation errors arrive as `{"detail": ".."}`,
    /// `{"error": ".."}` or a map of field name to message list.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { status, body } => {
                extract_body_message(body).unwrap_or_else(|| format!("Request failed ({status})"))
            }
            Self::Timeout => "The server did not respond in time. Please try again.".to_string(),
            Self::Transport(_) => "Could not reach the server. Please try again.".to_string(),
            Self::Validation(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else if err.is_builder() {
            Self::Setup(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

fn extract_body_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let object = value.as_object()?;
    for key in ["detail", "error"] {
        if let Some(message) = object.get(key).and_then(|value| value.as_str()) {
            return Some(message.to_string());
        }
    }
    let mut messages = Vec::new();
    for value in object.values() {
        collect_strings(value, &mut messages);
    }
    if messages.is_empty() {
        None
    } else {
        Some(messages.join(" "))
    }
}

fn collect_strings(value: &serde_json::Value, out: &mut Vec<String>) {
    match value {
        serde_json::Value::String(text) => out.push(text.clone()),
        serde_json::Value::Array(items) => {
            for item in items {
                collect_strings(item, out);
            }
        }
        _ => {}
    }
}
