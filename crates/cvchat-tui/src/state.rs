//! Application state.
//!
//! ```text
//! AppState
//! ├── chat: SubmissionController   (conversation, side channels, cycle)
//! ├── panel: PanelController       (side panel state machine)
//! ├── input: InputState            (buffer, history, queued prompts)
//! ├── notifications: Notifications (toasts)
//! ├── pending_attachments          (sent with the next prompt)
//! └── task_seq / reset_task        (single-flight session reset)
//! ```
//!
//! Mutated only by the reducer in `update.rs`.

use cvchat_core::chat::SubmissionController;
use cvchat_core::config::{Config, Theme};
use cvchat_core::panel::{PanelController, PanelState};
use cvchat_types::Attachment;

use crate::common::{TaskSeq, TaskState};
use crate::features::input::InputState;
use crate::features::notifications::Notifications;

pub struct AppState {
    pub should_quit: bool,
    pub chat: SubmissionController,
    pub panel: PanelController,
    pub input: InputState,
    pub notifications: Notifications,

    /// Attachments added with `/attach`, consumed by the next submission.
    pub pending_attachments: Vec<Attachment>,

    pub sidebar_expanded: bool,
    pub theme: Theme,

    /// Render tick counter driving the spinner.
    pub spinner_frame: usize,
    /// Transcript lines scrolled up from the bottom (0 = following).
    pub scroll_from_bottom: usize,
    /// Terminal size from the last `Frame` event.
    pub viewport: (u16, u16),

    pub task_seq: TaskSeq,
    pub reset_task: TaskState,
}

impl AppState {
    pub fn new(config: &Config, chat_id: impl Into<String>) -> Self {
        Self {
            should_quit: false,
            chat: SubmissionController::new(chat_id),
            panel: PanelController::new(config.panel_timings()),
            input: InputState::new(),
            notifications: Notifications::default(),
            pending_attachments: Vec::new(),
            sidebar_expanded: true,
            theme: config.theme,
            spinner_frame: 0,
            scroll_from_bottom: 0,
            viewport: (0, 0),
            task_seq: TaskSeq::default(),
            reset_task: TaskState::default(),
        }
    }

    /// True while something on screen is animating and the runtime should
    /// tick at frame rate.
    pub fn is_animating(&self) -> bool {
        self.chat.is_busy()
            || self.reset_task.is_running()
            || matches!(self.panel.state(), PanelState::Opening | PanelState::Closing)
            || !self.notifications.is_empty()
    }
}
