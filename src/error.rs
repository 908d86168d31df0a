// src/error.rs
//! Application error types with structured error handling.
//!
//! Each variant names what went wrong and where, so callers can decide
//! whether a failure skips one book, ends the sync, or aborts the run.

use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("WeRead returned HTTP {status} for {url}: {body}")]
    WereadService {
        status: reqwest::StatusCode,
        url: String,
        body: String,
    },

    #[error("WeRead rejected the request (errCode {code}): {message}")]
    WereadRejected { code: i64, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Webhook rejected the digest with HTTP {status}: {body}")]
    WebhookRejected {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error for {path}: {source}")]
    JsonParseError {
        path: std::path::PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Validation(#[from] crate::types::ValidationError),
}

impl AppError {
    /// Whether the remote side answered and refused, as opposed to a
    /// transport or parsing failure.
    pub fn is_remote_rejection(&self) -> bool {
        matches!(
            self,
            AppError::WereadService { .. }
                | AppError::WereadRejected { .. }
                | AppError::WebhookRejected { .. }
        )
    }
}

/// Shortens a response body for inclusion in an error message.
pub(crate) fn preview_body(body: &str) -> String {
    let mut chars = body.chars();
    let preview: String = chars.by_ref().take(ERROR_BODY_PREVIEW_LENGTH).collect();
    if chars.next().is_some() {
        format!("{}...", preview)
    } else {
        preview
    }
}
