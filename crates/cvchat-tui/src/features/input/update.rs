//! Input feature reducer.
//!
//! Editing keys and paste only. Submission and global shortcuts are decided
//! by the top-level reducer.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::InputState;
use crate::common::sanitize_for_display;

/// Inserts pasted text with escapes stripped and tabs expanded.
pub fn handle_paste(input: &mut InputState, text: &str) {
    input.insert_str(&sanitize_for_display(text));
}

/// Applies an editing key to the buffer.
///
/// Returns false when `key` is not an editing key.
pub fn handle_edit_key(input: &mut InputState, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Char('a') if ctrl => input.move_home(),
        KeyCode::Char('e') if ctrl => input.move_end(),
        KeyCode::Char('u') if ctrl => input.clear(),
        KeyCode::Char('w') if ctrl => input.delete_word_left(),
        KeyCode::Backspace if alt => input.delete_word_left(),
        KeyCode::Char(c) if !ctrl && !alt => input.insert_char(c),
        KeyCode::Backspace => input.delete_prev_char(),
        KeyCode::Delete => input.delete_next_char(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_home(),
        KeyCode::End => input.move_end(),
        KeyCode::Up => input.navigate_up(),
        KeyCode::Down => input.navigate_down(),
        _ => return false,
    }
    true
}
