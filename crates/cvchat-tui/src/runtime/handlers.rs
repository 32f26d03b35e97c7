//! Effect handlers for the TUI runtime.
//!
//! These perform I/O and never touch `AppState`. Async handlers return the
//! `UiEvent` the runtime feeds back through the inbox.

use cvchat_core::chat::{PreparedCycle, stream_cycle};
use cvchat_core::client::ChatClient;
use cvchat_core::config::{Config, Theme};
use tokio::sync::mpsc;

use crate::common::TaskId;
use crate::events::UiEvent;

/// Runs a submission cycle, forwarding every update to the inbox.
pub async fn run_cycle(
    client: ChatClient,
    prepared: PreparedCycle,
    tx: mpsc::UnboundedSender<UiEvent>,
) {
    stream_cycle(client, prepared, move |update| {
        let _ = tx.send(UiEvent::Cycle(update));
    })
    .await;
}

/// Asks the service to drop the session.
pub async fn session_reset(client: ChatClient, task: TaskId, chat_id: String) -> UiEvent {
    let result = client
        .reset_session(&chat_id)
        .await
        .map_err(|e| e.message);
    if let Err(message) = &result {
        tracing::warn!(%chat_id, %message, "session reset failed");
    }
    UiEvent::SessionReset { task, result }
}

pub fn persist_theme(theme: Theme) {
    if let Err(e) = Config::save_theme(theme) {
        tracing::warn!("Failed to persist theme: {e:#}");
    }
}
