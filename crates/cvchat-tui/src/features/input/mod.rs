//! Input feature slice: editable prompt buffer, history and queue.

mod render;
mod state;
mod update;

pub use render::{calculate_input_height, render_input};
pub use state::InputState;
pub use update::{handle_edit_key, handle_paste};
