//! Send command handler.
//!
//! Runs one submission cycle without the TUI. Thinking notes go to stderr,
//! the final reply and any produced attachments go to stdout.

use std::io::{Write, stderr, stdout};

use anyhow::{Context, Result};
use cvchat_core::attachments::attachment_from_url;
use cvchat_core::chat::{
    Applied, CycleUpdate, SubmissionController, SubmitOutcome, UpdateOutcome, stream_cycle,
};
use cvchat_core::client::ChatClient;
use cvchat_types::{Attachment, ChatEvent};

use crate::cli::Session;

pub async fn run(session: &Session, prompt: &str, attach: &[String]) -> Result<()> {
    let attachments = attach
        .iter()
        .map(|url| attachment_from_url(url, None))
        .collect::<Result<Vec<Attachment>>>()?;

    let client = ChatClient::new(&session.config.client_config(session.base_url.clone()))?;
    let mut chat = SubmissionController::new(session.chat_id.clone());

    let prepared = match chat.begin(prompt, attachments) {
        SubmitOutcome::Started(prepared) => prepared,
        SubmitOutcome::Ignored => anyhow::bail!("Prompt is empty"),
        SubmitOutcome::Busy(_) => anyhow::bail!("A request is already in flight"),
    };
    let assistant_id = prepared.assistant_id.clone();
    tracing::info!(cycle = %prepared.cycle, chat_id = %session.chat_id, "sending prompt");

    let mut failure: Option<String> = None;
    let mut errored = false;
    stream_cycle(client, prepared, |update: CycleUpdate| {
        if let CycleUpdate::Event {
            event: ChatEvent::Thinking(Some(note)),
            ..
        } = &update
        {
            let _ = writeln!(stderr(), "… {note}");
        }
        match chat.on_update(update) {
            UpdateOutcome::Failed { notice } => failure = Some(notice),
            UpdateOutcome::Applied(Applied::Errored) => errored = true,
            _ => {}
        }
    })
    .await;

    if let Some(notice) = failure {
        anyhow::bail!(notice);
    }

    let reply = chat
        .conversation()
        .get(&assistant_id)
        .filter(|_| chat.conversation().is_finalized(&assistant_id))
        .context("Stream ended without a final response")?;

    if errored {
        let error = reply.content.strip_prefix("Error: ").unwrap_or(reply.content.as_str());
        anyhow::bail!("Service error: {error}");
    }

    let mut out = stdout().lock();
    writeln!(out, "{}", reply.content)?;
    for attachment in &reply.attachments {
        writeln!(out, "Attachment: {} <{}>", attachment.name, attachment.url)?;
    }
    out.flush()?;
    Ok(())
}
