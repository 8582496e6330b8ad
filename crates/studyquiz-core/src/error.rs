//! API error types.
//!
//! Defined in `studyquiz-core` so pages can inspect a failure (for example the
//! HTTP status) without depending on the HTTP client crate.

use thiserror::Error;

use crate::storage::StorageError;

/// Detail used when the server's error body cannot be read at all.
pub const DEFAULT_ERROR_DETAIL: &str = "An error occurred";

/// Errors that can occur when talking to the quiz service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The service answered with a non-success status.
    #[error("{status} {status_text}: {detail}")]
    Http {
        status: u16,
        status_text: String,
        detail: String,
    },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred before a response arrived.
    #[error("network error: {0}")]
    Network(String),

    /// The response body was not the expected JSON.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// Reading or writing local storage failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// Build an HTTP error, filling in the canonical reason phrase.
    pub fn http(status: u16, detail: impl Into<String>) -> Self {
        ApiError::Http {
            status,
            status_text: reason_phrase(status).to_string(),
            detail: detail.into(),
        }
    }

    /// The HTTP status, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Canonical reason phrase for the statuses the quiz service returns.
pub fn reason_phrase(status: u16) -> &'static str {
    match status {
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        409 => "Conflict",
        413 => "Payload Too Large",
        422 => "Unprocessable Entity",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        _ => "",
    }
}
