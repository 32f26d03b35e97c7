//! Feature slices for the TUI (state/update/render per slice).

pub mod input;
pub mod notifications;
pub mod panel;
pub mod sidebar;
pub mod transcript;
