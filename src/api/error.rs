use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Everything that can go wrong between a resource call and its unwrapped body.
///
/// `Clone` because one refresh outcome is handed to every request waiting on it.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("request timed out")]
    Timeout,
    #[error("couldn't reach server: {0}")]
    Network(#[source] Arc<reqwest::Error>),
    #[error("server responded with {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status {
        status: StatusCode,
        /// Message the server put into the error body, if any
        message: Option<String>,
        /// Error body as sent by the server
        body: Option<Value>,
    },
    #[error("couldn't decode response: {0}")]
    Decode(#[source] Arc<serde_json::Error>),
    #[error("couldn't encode request: {0}")]
    Encode(#[source] Arc<serde_json::Error>),
    #[error("invalid upload: {0}")]
    Upload(String),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl ApiError {
    pub(crate) fn from_response(status: StatusCode, text: &str) -> ApiError {
        let body = serde_json::from_str::<Value>(text).ok();
        let message = body.as_ref().and_then(server_message);
        ApiError::Status {
            status,
            message,
            body,
        }
    }

    pub(crate) fn decode(err: serde_json::Error) -> ApiError {
        ApiError::Decode(Arc::new(err))
    }

    pub(crate) fn encode(err: serde_json::Error) -> ApiError {
        ApiError::Encode(Arc::new(err))
    }

    /// HTTP status of the failed response, `None` if there was no response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Network(Arc::new(err))
        }
    }
}

/// Pull a human readable message out of an error body.
///
/// Looks at `message`, `error`, `error.message` and `detail`, in that order.
/// Blank fields are skipped.
fn server_message(body: &Value) -> Option<String> {
    let text = |v: Option<&Value>| {
        v.and_then(Value::as_str)
            .filter(|msg| !msg.trim().is_empty())
            .map(str::to_string)
    };

    text(body.get("message"))
        .or_else(|| text(body.get("error")))
        .or_else(|| text(body.get("error").and_then(|e| e.get("message"))))
        .or_else(|| text(body.get("detail")))
}
