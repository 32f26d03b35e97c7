//! Shared helpers used across feature slices.

pub mod commands;
pub mod palette;
pub mod task;
pub mod text;

pub use palette::Palette;
pub use task::{TaskId, TaskSeq, TaskState};
pub use text::{sanitize_for_display, truncate_with_ellipsis, wrap_text};
