//! Conversation messages and attachments.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a message within a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Author of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file attached to a message, keyed by its url.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub url: String,
    pub name: String,
    pub content_type: String,
}

impl Attachment {
    pub fn new(
        url: impl Into<String>,
        name: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
            content_type: content_type.into(),
        }
    }
}

/// A single entry in the conversation.
///
/// Messages are treated as values: updates produce a replacement through
/// `with_content` / `with_attachment` instead of mutating in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    pub content: String,
    pub attachments: Vec<Attachment>,
}

impl Message {
    pub fn user(id: MessageId, content: impl Into<String>) -> Self {
        Self {
            id,
            role: Role::User,
            content: content.into(),
            attachments: Vec::new(),
        }
    }

    /// Empty assistant message that a streaming cycle fills in.
    pub fn assistant_placeholder(id: MessageId) -> Self {
        Self {
            id,
            role: Role::Assistant,
            content: String::new(),
            attachments: Vec::new(),
        }
    }

    /// Returns a copy with the content replaced.
    #[must_use]
    pub fn with_content(&self, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..self.clone()
        }
    }

    /// Returns a copy with `attachment` appended.
    ///
    /// An existing attachment with the same url is dropped first, so the
    /// list never holds two entries for one url.
    #[must_use]
    pub fn with_attachment(&self, attachment: Attachment) -> Self {
        let mut attachments: Vec<Attachment> = self
            .attachments
            .iter()
            .filter(|existing| existing.url != attachment.url)
            .cloned()
            .collect();
        attachments.push(attachment);
        Self {
            attachments,
            ..self.clone()
        }
    }
}
