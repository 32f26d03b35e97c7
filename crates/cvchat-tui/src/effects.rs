//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They cover I/O and task spawning only; state changes happen in the
//! reducer itself.

use cvchat_core::chat::PreparedCycle;
use cvchat_core::config::Theme;

use crate::common::TaskId;

#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Open the chat stream for a prepared cycle and pump its events.
    StartCycle(PreparedCycle),

    /// Ask the service to drop the session for `chat_id`.
    ResetSession { task: TaskId, chat_id: String },

    /// Persist the theme preference to config.
    PersistTheme { theme: Theme },
}
