//! UI event types.
//!
//! Everything the reducer reacts to arrives as a `UiEvent`: terminal input,
//! timer ticks, progress from running cycles, and results of background
//! tasks delivered through the runtime inbox.

use crossterm::event::Event as CrosstermEvent;
use cvchat_core::chat::CycleUpdate;

use crate::common::TaskId;

#[derive(Debug)]
pub enum UiEvent {
    /// Timer tick (spinner, toast expiry, panel fallback timer).
    Tick,

    /// Current terminal size, sent once per loop iteration before others.
    Frame { width: u16, height: u16 },

    /// Raw terminal input (keys, paste, resize).
    Terminal(CrosstermEvent),

    /// Progress of a submission cycle.
    Cycle(CycleUpdate),

    /// Result of a session reset request.
    SessionReset {
        task: TaskId,
        result: Result<(), String>,
    },

    /// The panel slide has been drawn to its end.
    PanelTransitionEnd,
}
