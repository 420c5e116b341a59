//! Error responses
//!
//! Every failure leaves the server as `{ "error": message, "kind": kind }`
//! with the status code of its [`ErrorKind`].

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

use crate::types::{ErrorKind, ReadmeError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub kind: String,
}

#[derive(Debug)]
pub struct ApiError {
    kind: ErrorKind,
    message: String,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The whole request outlived the server's request timeout
    pub fn timeout(limit: Duration) -> Self {
        Self {
            kind: ErrorKind::Timeout,
            message: format!("Request timed out after {}s", limit.as_secs()),
        }
    }

    /// Middleware failure outside any handler
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Internal,
            message: message.into(),
        }
    }
}

impl From<ReadmeError> for ApiError {
    fn from(err: ReadmeError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Malformed or non-JSON bodies are the caller's fault
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            kind: ErrorKind::Validation,
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.kind.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.kind.is_client_error() {
            debug!(kind = %self.kind, "Request rejected: {}", self.message);
        } else {
            error!(kind = %self.kind, "Request failed: {}", self.message);
        }

        let body = ErrorBody {
            error: self.message,
            kind: self.kind.as_str().to_string(),
        };
        (status, Json(body)).into_response()
    }
}
