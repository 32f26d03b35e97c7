//! Submission controller.
//!
//! Drives one request/stream cycle per submitted prompt. The synchronous
//! half (`begin`, `on_update`) owns the conversation and runs on the UI
//! thread; the async half (`stream_cycle`) runs on a tokio task and only
//! reports [`CycleUpdate`]s back through a sink.

use std::fmt;

use cvchat_types::{Attachment, ChatEvent, ChatRequest, Message, MessageId};
use futures_util::{Stream, StreamExt};

use super::reducer::{Applied, apply_event};
use super::store::{Conversation, SideChannels};
use crate::client::{ChatClient, ClientError, ClientResult};
use crate::ids::{IdGenerator, assistant_id_for};

/// Identifies one submission's request/stream lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CycleId(u64);

impl fmt::Display for CycleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything the async half needs to run a cycle.
#[derive(Debug, Clone)]
pub struct PreparedCycle {
    pub cycle: CycleId,
    pub assistant_id: MessageId,
    pub request: ChatRequest,
}

/// Result of [`SubmissionController::begin`].
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Blank input; nothing changed.
    Ignored,
    /// A cycle is already running. Carries the prompt back to the caller.
    Busy(String),
    Started(PreparedCycle),
}

/// Progress reported by a running cycle.
#[derive(Debug, Clone)]
pub enum CycleUpdate {
    /// The stream is open; the assistant placeholder may be shown.
    Opened { cycle: CycleId },
    Event { cycle: CycleId, event: ChatEvent },
    /// Transport failure. The cycle still ends with `Finished`.
    Failed { cycle: CycleId, error: ClientError },
    Finished { cycle: CycleId },
}

impl CycleUpdate {
    pub fn cycle(&self) -> CycleId {
        match self {
            CycleUpdate::Opened { cycle }
            | CycleUpdate::Event { cycle, .. }
            | CycleUpdate::Failed { cycle, .. }
            | CycleUpdate::Finished { cycle } => *cycle,
        }
    }
}

/// Result of [`SubmissionController::on_update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The update belonged to a cycle that is no longer active.
    Stale,
    Opened,
    Applied(Applied),
    /// A transport failure; `notice` is the text to show the user.
    Failed { notice: String },
    Finished,
}

#[derive(Debug, Clone)]
struct ActiveCycle {
    cycle: CycleId,
    assistant_id: MessageId,
}

/// Owns the conversation and sequences submissions.
#[derive(Debug)]
pub struct SubmissionController {
    conversation: Conversation,
    side: SideChannels,
    chat_id: String,
    ids: IdGenerator,
    next_cycle: u64,
    active: Option<ActiveCycle>,
}

impl SubmissionController {
    pub fn new(chat_id: impl Into<String>) -> Self {
        Self {
            conversation: Conversation::new(),
            side: SideChannels::new(),
            chat_id: chat_id.into(),
            ids: IdGenerator::new(),
            next_cycle: 1,
            active: None,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn side_channels(&self) -> &SideChannels {
        &self.side
    }

    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }

    pub fn is_busy(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_cycle(&self) -> Option<CycleId> {
        self.active.as_ref().map(|a| a.cycle)
    }

    /// Id of the assistant message the running cycle writes to.
    pub fn active_assistant_id(&self) -> Option<&MessageId> {
        self.active.as_ref().map(|a| &a.assistant_id)
    }

    /// Starts a cycle for `text`.
    ///
    /// On success the user message is already in the conversation and the
    /// returned request carries the full history including it.
    pub fn begin(&mut self, text: &str, attachments: Vec<Attachment>) -> SubmitOutcome {
        if text.trim().is_empty() {
            return SubmitOutcome::Ignored;
        }
        if self.is_busy() {
            return SubmitOutcome::Busy(text.to_string());
        }

        let user_id = self.ids.next_id();
        let assistant_id = assistant_id_for(&user_id);
        self.conversation.push(Message::user(user_id, text));

        let cycle = CycleId(self.next_cycle);
        self.next_cycle += 1;
        self.active = Some(ActiveCycle {
            cycle,
            assistant_id: assistant_id.clone(),
        });

        let request = ChatRequest::new(self.conversation.messages(), attachments, &self.chat_id);
        tracing::info!(
            cycle = %cycle,
            messages = request.messages.len(),
            "submission started"
        );

        SubmitOutcome::Started(PreparedCycle {
            cycle,
            assistant_id,
            request,
        })
    }

    /// Applies a cycle update.
    pub fn on_update(&mut self, update: CycleUpdate) -> UpdateOutcome {
        let Some(active) = self.active.as_ref().filter(|a| a.cycle == update.cycle()) else {
            tracing::debug!(cycle = %update.cycle(), "ignoring update for inactive cycle");
            return UpdateOutcome::Stale;
        };
        let assistant_id = active.assistant_id.clone();

        match update {
            CycleUpdate::Opened { .. } => {
                if self.conversation.get(&assistant_id).is_none() {
                    self.conversation
                        .push(Message::assistant_placeholder(assistant_id));
                }
                UpdateOutcome::Opened
            }
            CycleUpdate::Event { event, .. } => UpdateOutcome::Applied(apply_event(
                &mut self.conversation,
                &mut self.side,
                &assistant_id,
                &event,
            )),
            CycleUpdate::Failed { error, .. } => UpdateOutcome::Failed {
                notice: error.message,
            },
            CycleUpdate::Finished { cycle } => {
                tracing::info!(cycle = %cycle, "submission finished");
                self.active = None;
                UpdateOutcome::Finished
            }
        }
    }

    /// Drops all conversation state. A running cycle becomes stale.
    pub fn reset(&mut self) {
        self.conversation.clear();
        self.side.clear();
        self.active = None;
    }
}

/// Runs one cycle against the service, reporting progress to `sink`.
///
/// `Finished` is always the last update sent.
pub async fn stream_cycle<F>(client: ChatClient, prepared: PreparedCycle, mut sink: F)
where
    F: FnMut(CycleUpdate) + Send,
{
    let cycle = prepared.cycle;
    match client.open_chat_stream(&prepared.request).await {
        Ok(stream) => {
            sink(CycleUpdate::Opened { cycle });
            pump_events(cycle, stream, &mut sink).await;
        }
        Err(error) => {
            tracing::warn!(cycle = %cycle, kind = %error.kind, error = %error, "chat request failed");
            sink(CycleUpdate::Failed { cycle, error });
        }
    }
    sink(CycleUpdate::Finished { cycle });
}

/// Forwards decoded events until the stream ends or fails.
pub async fn pump_events<S, F>(cycle: CycleId, mut stream: S, sink: &mut F)
where
    S: Stream<Item = ClientResult<ChatEvent>> + Unpin,
    F: FnMut(CycleUpdate),
{
    while let Some(item) = stream.next().await {
        match item {
            Ok(event) => sink(CycleUpdate::Event { cycle, event }),
            Err(error) => {
                tracing::warn!(cycle = %cycle, error = %error, "chat stream failed");
                sink(CycleUpdate::Failed { cycle, error });
                break;
            }
        }
    }
}
