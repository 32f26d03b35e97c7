//! Transcript feature slice: conversation view and the empty-state overview.

mod overview;
mod render;

pub use overview::render_overview;
pub use render::{SPINNER_FRAMES, SPINNER_SPEED_DIVISOR, render_transcript, spinner_glyph};
