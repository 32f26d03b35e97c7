//! Reset command handler.

use anyhow::{Context, Result};
use cvchat_core::client::ChatClient;

use crate::cli::Session;

pub async fn run(session: &Session) -> Result<()> {
    if !session.chat_id_explicit {
        anyhow::bail!("No chat id to reset. Pass --chat-id or set chat_id in the config file.");
    }

    let client = ChatClient::new(&session.config.client_config(session.base_url.clone()))?;
    client
        .reset_session(&session.chat_id)
        .await
        .map_err(|e| anyhow::anyhow!(e.message))
        .context("Failed to reset session")?;

    tracing::info!(chat_id = %session.chat_id, "session reset");
    println!("New session started");
    Ok(())
}
