//! Outbound request bodies.

use serde::{Deserialize, Serialize};

use crate::message::{Attachment, Message, Role};

/// Message as sent to the chat service (role + text only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: Role,
    pub content: String,
}

impl From<&Message> for WireMessage {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role,
            content: message.content.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestData {
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub messages: Vec<WireMessage>,
    pub data: RequestData,
    pub chat_id: String,
}

impl ChatRequest {
    /// Builds a request from the full history (which must already include
    /// the newly submitted message).
    pub fn new(history: &[Message], attachments: Vec<Attachment>, chat_id: &str) -> Self {
        Self {
            messages: history.iter().map(WireMessage::from).collect(),
            data: RequestData { attachments },
            chat_id: chat_id.to_string(),
        }
    }
}

/// Body of `POST /api/session/reset`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetRequest {
    pub chat_id: String,
}
