//! Applies streamed events to the conversation.
//!
//! Each event touches only the assistant message of its cycle. Once a
//! terminal event (`final` or `error`) has been applied, later events for
//! that message are ignored.

use cvchat_types::{ChatEvent, MessageId};

use super::store::{Conversation, SideChannels};

/// What an event did to the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// A note was appended to the thinking log.
    Thinking,
    /// A pending attachment was stored.
    PendingAttachment,
    /// The message received its final content.
    Finalized,
    /// The message was replaced by an error text.
    Errored,
    /// Nothing changed.
    Ignored,
}

impl Applied {
    pub fn is_terminal(self) -> bool {
        matches!(self, Applied::Finalized | Applied::Errored)
    }
}

/// Applies one event to the message `assistant_id`.
pub fn apply_event(
    conversation: &mut Conversation,
    side: &mut SideChannels,
    assistant_id: &MessageId,
    event: &ChatEvent,
) -> Applied {
    if conversation.is_finalized(assistant_id) {
        tracing::debug!(id = %assistant_id, kind = event.kind(), "event after finalization ignored");
        return Applied::Ignored;
    }

    match event {
        ChatEvent::Thinking(Some(note)) => {
            side.push_thinking(assistant_id, note.clone());
            Applied::Thinking
        }
        ChatEvent::ResumeReady(Some(attachment)) => {
            side.set_pending(assistant_id, attachment.clone());
            Applied::PendingAttachment
        }
        ChatEvent::Thinking(None) | ChatEvent::ResumeReady(None) => Applied::Ignored,
        ChatEvent::Final { response } => {
            let Some(current) = conversation.get(assistant_id) else {
                tracing::warn!(id = %assistant_id, "final event without placeholder");
                return Applied::Ignored;
            };
            let mut updated = current.with_content(response.as_str());
            if let Some(attachment) = side.take_pending(assistant_id) {
                updated = updated.with_attachment(attachment);
            }
            conversation.replace(updated);
            conversation.mark_finalized(assistant_id.clone());
            Applied::Finalized
        }
        ChatEvent::Error { message } => {
            let Some(current) = conversation.get(assistant_id) else {
                tracing::warn!(id = %assistant_id, "error event without placeholder");
                return Applied::Ignored;
            };
            let updated = current.with_content(format!("Error: {message}"));
            conversation.replace(updated);
            conversation.mark_errored(assistant_id.clone());
            side.take_pending(assistant_id);
            Applied::Errored
        }
        ChatEvent::Other(kind) => {
            tracing::debug!(kind = %kind, "ignoring unknown event");
            Applied::Ignored
        }
    }
}
