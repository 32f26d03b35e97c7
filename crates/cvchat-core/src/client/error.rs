//! Transport errors for the chat service.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Categories of client errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientErrorKind {
    /// Could not reach the service or the request failed before a response.
    Connection,
    /// Request timed out.
    Timeout,
    /// Non-success HTTP status.
    HttpStatus,
    /// The response carried no body to stream.
    MissingBody,
    /// The body stream failed while reading.
    Stream,
}

impl fmt::Display for ClientErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientErrorKind::Connection => write!(f, "connection"),
            ClientErrorKind::Timeout => write!(f, "timeout"),
            ClientErrorKind::HttpStatus => write!(f, "http_status"),
            ClientErrorKind::MissingBody => write!(f, "missing_body"),
            ClientErrorKind::Stream => write!(f, "stream"),
        }
    }
}

/// Structured client error with kind and details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientError {
    pub kind: ClientErrorKind,
    /// One-line summary suitable for a notification.
    pub message: String,
    /// Optional additional details (e.g., raw error body).
    pub details: Option<String>,
}

impl ClientError {
    pub fn new(kind: ClientErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    /// Creates an HTTP status error, pulling a readable message out of a
    /// JSON body when the service sent one.
    pub fn http_status(status: u16, body: &str) -> Self {
        if body.trim().is_empty() {
            return Self::new(ClientErrorKind::HttpStatus, format!("HTTP {status}"));
        }

        let summary = serde_json::from_str::<Value>(body).ok().and_then(|json| {
            json.get("detail")
                .or_else(|| json.get("message"))
                .or_else(|| json.get("error").and_then(|e| e.get("message")))
                .or_else(|| json.get("error"))
                .and_then(Value::as_str)
                .map(str::to_string)
        });

        Self {
            kind: ClientErrorKind::HttpStatus,
            message: match summary {
                Some(msg) => format!("HTTP {status}: {msg}"),
                None => format!("HTTP {status}"),
            },
            details: Some(body.to_string()),
        }
    }

    pub fn missing_body() -> Self {
        Self::new(ClientErrorKind::MissingBody, "No response body")
    }

    pub fn stream(err: impl fmt::Display) -> Self {
        Self::new(ClientErrorKind::Stream, format!("Streaming failed: {err}"))
    }

    /// Maps a reqwest error onto a kind.
    pub fn from_reqwest(e: &reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::new(ClientErrorKind::Timeout, format!("Request timed out: {e}"))
        } else if e.is_connect() {
            Self::new(ClientErrorKind::Connection, format!("Connection failed: {e}"))
        } else if e.is_body() || e.is_decode() {
            Self::stream(e)
        } else {
            Self::new(ClientErrorKind::Connection, format!("Network error: {e}"))
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ClientError {}

/// Result type for client operations.
pub type ClientResult<T> = std::result::Result<T, ClientError>;
