//! Streamed chat events.
//!
//! `RawEvent` is one decoded NDJSON frame exactly as the server sent it.
//! `ChatEvent` is the typed view the reducer consumes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::message::Attachment;

/// Content type used when a `resume_ready` payload omits one.
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Fallback text for `error` events without a message.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// One frame of the response stream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    /// Event kind (`thinking`, `resume_ready`, `final`, `error`, ...).
    #[serde(default)]
    pub event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Value>,
}

impl RawEvent {
    /// Builds an event from any JSON value.
    ///
    /// Non-object values and objects without a string `event` field yield an
    /// event with an empty kind, which the reducer ignores. `null` fields are
    /// treated as absent.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut map) = value else {
            return Self::default();
        };

        let event = match map.remove("event") {
            Some(Value::String(kind)) => kind,
            _ => String::new(),
        };
        let mut take = |key: &str| map.remove(key).filter(|v| !v.is_null());

        Self {
            event,
            data: take("data"),
            response: take("response"),
            message: take("message"),
        }
    }

    /// Converts the frame into its typed form.
    pub fn into_chat_event(self) -> ChatEvent {
        match self.event.as_str() {
            "thinking" => ChatEvent::Thinking(self.data.as_ref().map(stringify)),
            "resume_ready" => {
                ChatEvent::ResumeReady(self.data.as_ref().and_then(attachment_from_data))
            }
            "final" => {
                let response = self
                    .response
                    .as_ref()
                    .or_else(|| self.data.as_ref().and_then(|d| d.get("response")))
                    .filter(|v| !v.is_null())
                    .map(stringify)
                    .unwrap_or_default();
                ChatEvent::Final { response }
            }
            "error" => {
                let message = self
                    .message
                    .as_ref()
                    .map(stringify)
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| UNKNOWN_ERROR.to_string());
                ChatEvent::Error { message }
            }
            _ => ChatEvent::Other(self.event),
        }
    }
}

/// Typed stream event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// Progress note for the thinking log. `None` when the frame had no data.
    Thinking(Option<String>),
    /// A generated resume is available. `None` when the payload had no url.
    ResumeReady(Option<Attachment>),
    /// Terminal event carrying the final reply.
    Final { response: String },
    /// Terminal event reported by the server.
    Error { message: String },
    /// Unrecognized kind, kept for logging.
    Other(String),
}

impl ChatEvent {
    pub fn kind(&self) -> &str {
        match self {
            ChatEvent::Thinking(_) => "thinking",
            ChatEvent::ResumeReady(_) => "resume_ready",
            ChatEvent::Final { .. } => "final",
            ChatEvent::Error { .. } => "error",
            ChatEvent::Other(kind) => kind,
        }
    }

    /// Returns true for events that close the assistant message.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ChatEvent::Final { .. } | ChatEvent::Error { .. })
    }
}

/// Strings pass through; every other JSON value is serialized.
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn attachment_from_data(data: &Value) -> Option<Attachment> {
    let url = data.get("url").and_then(Value::as_str)?.trim();
    if url.is_empty() {
        return None;
    }

    let name = data
        .get("name")
        .and_then(Value::as_str)
        .filter(|n| !n.trim().is_empty())
        .map_or_else(|| file_name_from_url(url), str::to_string);
    let content_type = data
        .get("contentType")
        .and_then(Value::as_str)
        .filter(|c| !c.trim().is_empty())
        .unwrap_or(DEFAULT_CONTENT_TYPE);

    Some(Attachment::new(url, name, content_type))
}

fn file_name_from_url(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or(path)
        .to_string()
}
