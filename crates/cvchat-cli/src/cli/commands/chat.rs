//! Chat command handler.

use std::io::{IsTerminal, Read};

use anyhow::{Context, Result};

use super::send;
use crate::cli::Session;

pub async fn run(session: &Session) -> Result<()> {
    // If stdin is piped, send it as a single prompt instead.
    if !std::io::stdin().is_terminal() {
        let mut prompt = String::new();
        std::io::stdin().lock().read_to_string(&mut prompt)?;
        let prompt = prompt.trim();
        if prompt.is_empty() {
            anyhow::bail!("No input provided via pipe");
        }
        return send::run(session, prompt, &[]).await;
    }

    run_tui(session).await.context("interactive chat failed")
}

#[cfg(feature = "tui")]
async fn run_tui(session: &Session) -> Result<()> {
    cvchat_tui::run_interactive_chat(
        &session.config,
        session.base_url.clone(),
        session.chat_id.clone(),
    )
    .await
}

#[cfg(not(feature = "tui"))]
async fn run_tui(_session: &Session) -> Result<()> {
    anyhow::bail!("TUI support is disabled in this build (feature \"tui\").");
}
