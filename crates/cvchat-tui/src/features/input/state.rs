//! User input state.
//!
//! Single editable buffer with a char-indexed cursor, prompt history for
//! ↑/↓ navigation, and the queue of prompts waiting for the running cycle.

use std::collections::VecDeque;

#[derive(Debug, Default)]
pub struct InputState {
    text: String,
    /// Cursor position in chars.
    cursor: usize,

    /// Submitted prompts, oldest first.
    pub history: Vec<String>,
    /// Current position in history (None = not navigating).
    pub history_index: Option<usize>,
    /// Draft text saved when navigating history.
    pub draft: Option<String>,

    /// Prompts to send after the current cycle finishes.
    pub queued: VecDeque<String>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Takes the buffer contents, leaving the input empty.
    pub fn take_text(&mut self) -> String {
        self.cursor = 0;
        self.reset_navigation();
        std::mem::take(&mut self.text)
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.char_len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
        self.reset_navigation();
    }

    pub fn insert_char(&mut self, ch: char) {
        let idx = self.byte_index(self.cursor);
        self.text.insert(idx, ch);
        self.cursor += 1;
    }

    pub fn insert_str(&mut self, s: &str) {
        let idx = self.byte_index(self.cursor);
        self.text.insert_str(idx, s);
        self.cursor += s.chars().count();
    }

    /// Backspace semantics.
    pub fn delete_prev_char(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let start = self.byte_index(self.cursor - 1);
        let end = self.byte_index(self.cursor);
        self.text.replace_range(start..end, "");
        self.cursor -= 1;
    }

    /// Delete-key semantics.
    pub fn delete_next_char(&mut self) {
        if self.cursor >= self.char_len() {
            return;
        }
        let start = self.byte_index(self.cursor);
        let end = self.byte_index(self.cursor + 1);
        self.text.replace_range(start..end, "");
    }

    /// Deletes the word left of the cursor (Ctrl+W).
    pub fn delete_word_left(&mut self) {
        let chars: Vec<char> = self.text.chars().collect();
        let mut idx = self.cursor.min(chars.len());
        while idx > 0 && chars[idx - 1].is_whitespace() {
            idx -= 1;
        }
        while idx > 0 && !chars[idx - 1].is_whitespace() {
            idx -= 1;
        }
        let start = self.byte_index(idx);
        let end = self.byte_index(self.cursor);
        self.text.replace_range(start..end, "");
        self.cursor = idx;
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_len());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Records a submitted prompt, skipping consecutive duplicates.
    pub fn push_history(&mut self, text: &str) {
        if text.trim().is_empty() || self.history.last().is_some_and(|last| last == text) {
            return;
        }
        self.history.push(text.to_string());
    }

    pub fn reset_navigation(&mut self) {
        self.history_index = None;
        self.draft = None;
    }

    pub fn navigate_up(&mut self) {
        if self.history.is_empty() {
            return;
        }

        if self.history_index.is_none() {
            self.draft = Some(self.text.clone());
            self.history_index = Some(self.history.len() - 1);
        } else if let Some(idx) = self.history_index
            && idx > 0
        {
            self.history_index = Some(idx - 1);
        }

        if let Some(idx) = self.history_index
            && let Some(entry) = self.history.get(idx).cloned()
        {
            self.set_text(&entry);
        }
    }

    pub fn navigate_down(&mut self) {
        let Some(idx) = self.history_index else {
            return;
        };

        if idx + 1 < self.history.len() {
            self.history_index = Some(idx + 1);
            if let Some(entry) = self.history.get(idx + 1).cloned() {
                self.set_text(&entry);
            }
        } else {
            let draft = self.draft.take().unwrap_or_default();
            self.history_index = None;
            self.set_text(&draft);
        }
    }

    pub fn enqueue_prompt(&mut self, text: String) {
        self.queued.push_back(text);
    }

    pub fn pop_queued_prompt(&mut self) -> Option<String> {
        self.queued.pop_front()
    }

    /// First line of each queued prompt; truncation happens at render time.
    pub fn queued_summaries(&self, max_items: usize) -> Vec<String> {
        self.queued
            .iter()
            .take(max_items)
            .map(|item| item.lines().next().unwrap_or("").to_string())
            .collect()
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map_or(self.text.len(), |(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editing_respects_multibyte_chars() {
        let mut input = InputState::new();
        input.insert_str("héllo");
        input.move_left();
        input.move_left();
        input.insert_char('✓');
        assert_eq!(input.text(), "hél✓lo");
        input.delete_prev_char();
        input.delete_next_char();
        assert_eq!(input.text(), "hélo");
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn delete_word_left_stops_at_whitespace() {
        let mut input = InputState::new();
        input.insert_str("tailor my resume  ");
        input.delete_word_left();
        assert_eq!(input.text(), "tailor my ");
        input.delete_word_left();
        assert_eq!(input.text(), "tailor ");
    }

    #[test]
    fn history_navigation_restores_draft() {
        let mut input = InputState::new();
        input.push_history("first");
        input.push_history("second");
        input.push_history("second");
        assert_eq!(input.history.len(), 2);

        input.insert_str("draft");
        input.navigate_up();
        assert_eq!(input.text(), "second");
        input.navigate_up();
        assert_eq!(input.text(), "first");
        input.navigate_up();
        assert_eq!(input.text(), "first");
        input.navigate_down();
        assert_eq!(input.text(), "second");
        input.navigate_down();
        assert_eq!(input.text(), "draft");
        assert!(input.history_index.is_none());
    }

    #[test]
    fn take_text_empties_buffer() {
        let mut input = InputState::new();
        input.insert_str("hello");
        assert_eq!(input.take_text(), "hello");
        assert!(input.is_empty());
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn queue_is_fifo() {
        let mut input = InputState::new();
        input.enqueue_prompt("one\nmore".to_string());
        input.enqueue_prompt("two".to_string());
        assert_eq!(input.queued_summaries(5), vec!["one", "two"]);
        assert_eq!(input.pop_queued_prompt().as_deref(), Some("one\nmore"));
    }
}
