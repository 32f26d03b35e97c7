//! Full-screen chat TUI for cvchat.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, Write, stderr};

use anyhow::Result;
use cvchat_core::config::Config;
pub use runtime::TuiRuntime;

/// Runs the interactive chat loop.
///
/// # Errors
/// Returns an error if stderr is not a terminal or terminal I/O fails.
pub async fn run_interactive_chat(
    config: &Config,
    base_url: String,
    chat_id: String,
) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "Chat mode requires a terminal.\n\
             Use `cvchat send --prompt '...'` for non-interactive use."
        );
    }

    tracing::info!(%base_url, %chat_id, "starting chat");
    let mut err = stderr();
    writeln!(err, "cvchat")?;
    writeln!(err, "Server: {base_url}")?;
    writeln!(err, "Chat: {chat_id}")?;
    err.flush()?;

    let mut runtime = TuiRuntime::new(config, base_url, chat_id)?;
    runtime.run()?;
    drop(runtime);

    writeln!(stderr(), "Goodbye!")?;
    Ok(())
}
