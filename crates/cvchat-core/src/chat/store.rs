//! Conversation state and per-message side channels.

use std::collections::{HashMap, HashSet};

use cvchat_types::{Attachment, Message, MessageId};

/// Ordered message thread. Insertion order is display order.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<Message>,
    finalized: HashSet<MessageId>,
    errored: HashSet<MessageId>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn get(&self, id: &MessageId) -> Option<&Message> {
        self.messages.iter().find(|m| &m.id == id)
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Swaps in a new version of an existing message, keeping its position.
    ///
    /// Returns false when no message has that id.
    pub fn replace(&mut self, message: Message) -> bool {
        match self.messages.iter_mut().find(|m| m.id == message.id) {
            Some(slot) => {
                *slot = message;
                true
            }
            None => false,
        }
    }

    /// True once a terminal event has been applied to `id`.
    pub fn is_finalized(&self, id: &MessageId) -> bool {
        self.finalized.contains(id)
    }

    pub fn mark_finalized(&mut self, id: MessageId) {
        self.finalized.insert(id);
    }

    /// True when `id` was finalized by a server `error` event.
    pub fn is_errored(&self, id: &MessageId) -> bool {
        self.errored.contains(id)
    }

    pub fn mark_errored(&mut self, id: MessageId) {
        self.finalized.insert(id.clone());
        self.errored.insert(id);
    }

    pub fn clear(&mut self) {
        self.messages.clear();
        self.finalized.clear();
        self.errored.clear();
    }
}

/// Data received during a cycle that is not part of the visible message yet.
#[derive(Debug, Clone, Default)]
pub struct SideChannels {
    thinking: HashMap<MessageId, Vec<String>>,
    pending: HashMap<MessageId, Attachment>,
}

impl SideChannels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Thinking log for `id`, oldest first.
    pub fn thinking(&self, id: &MessageId) -> &[String] {
        self.thinking.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn push_thinking(&mut self, id: &MessageId, note: String) {
        self.thinking.entry(id.clone()).or_default().push(note);
    }

    /// Stores the pending attachment for `id`, replacing an earlier one.
    pub fn set_pending(&mut self, id: &MessageId, attachment: Attachment) {
        self.pending.insert(id.clone(), attachment);
    }

    pub fn pending(&self, id: &MessageId) -> Option<&Attachment> {
        self.pending.get(id)
    }

    pub fn take_pending(&mut self, id: &MessageId) -> Option<Attachment> {
        self.pending.remove(id)
    }

    pub fn clear(&mut self) {
        self.thinking.clear();
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_keeps_position() {
        let mut conversation = Conversation::new();
        conversation.push(Message::user(MessageId::new("1"), "hi"));
        conversation.push(Message::assistant_placeholder(MessageId::new("1-assistant")));
        conversation.push(Message::user(MessageId::new("2"), "again"));

        let updated = conversation
            .get(&MessageId::new("1-assistant"))
            .unwrap()
            .with_content("hello");
        assert!(conversation.replace(updated));

        let contents: Vec<&str> = conversation
            .messages()
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(contents, ["hi", "hello", "again"]);
    }

    #[test]
    fn replace_unknown_id_is_rejected() {
        let mut conversation = Conversation::new();
        assert!(!conversation.replace(Message::user(MessageId::new("9"), "x")));
        assert!(conversation.is_empty());
    }

    #[test]
    fn clear_forgets_finalized_ids() {
        let mut conversation = Conversation::new();
        conversation.push(Message::user(MessageId::new("1"), "hi"));
        conversation.mark_finalized(MessageId::new("1"));
        conversation.clear();
        assert!(!conversation.is_finalized(&MessageId::new("1")));
        assert_eq!(conversation.len(), 0);
    }

    #[test]
    fn side_channels_track_per_message() {
        let a = MessageId::new("1-assistant");
        let b = MessageId::new("2-assistant");
        let mut side = SideChannels::new();
        side.push_thinking(&a, "one".to_string());
        side.push_thinking(&a, "two".to_string());
        side.set_pending(&a, Attachment::new("u1", "first", "text/plain"));
        side.set_pending(&a, Attachment::new("u2", "second", "text/plain"));

        assert_eq!(side.thinking(&a), ["one", "two"]);
        assert!(side.thinking(&b).is_empty());
        assert_eq!(side.pending(&a).map(|p| p.url.as_str()), Some("u2"));
        assert_eq!(side.take_pending(&a).map(|p| p.name), Some("second".to_string()));
        assert!(side.pending(&a).is_none());

        side.clear();
        assert!(side.thinking(&a).is_empty());
    }
}
