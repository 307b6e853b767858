//! Error types for the endpoint module.

use std::path::PathBuf;
use thiserror::Error;

/// Message shown when the service gives no usable reason.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to process files";

/// Errors that can occur while talking to the extraction service.
#[derive(Debug, Error)]
pub enum EndpointError {
    /// The service answered with a non-success status.
    #[error("Service rejected the request (HTTP {status}): {}", rejection_text(.message))]
    Rejected {
        status: u16,
        /// The `error` field of the response payload, when present.
        message: Option<String>,
    },

    /// Could not connect to the service.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The request timed out.
    #[error("Request timed out")]
    Timeout,

    /// Any other transport failure.
    #[error("Request failed: {0}")]
    Request(String),

    /// The response could not be read or parsed.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// A multipart part could not be built.
    #[error("Invalid upload part '{name}': {reason}")]
    InvalidPart { name: String, reason: String },

    /// A selected file could not be read from disk.
    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn rejection_text(message: &Option<String>) -> &str {
    message
        .as_deref()
        .filter(|m| !m.trim().is_empty())
        .unwrap_or(GENERIC_FAILURE_MESSAGE)
}

impl EndpointError {
    /// Text shown to the user after `"Error: "`.
    ///
    /// Service rejections use the payload message or the generic fallback;
    /// everything else uses its own description.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected { message, .. } => rejection_text(message).to_string(),
            other => other.to_string(),
        }
    }

    /// Map a reqwest failure onto the taxonomy.
    pub(crate) fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_connect() {
            Self::ConnectionFailed(e.to_string())
        } else {
            Self::Request(e.to_string())
        }
    }
}
