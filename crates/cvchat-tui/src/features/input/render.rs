//! Input feature view.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthChar;

use super::state::InputState;
use crate::common::Palette;

/// Minimum height of the input area (lines, including borders).
const INPUT_HEIGHT_MIN: u16 = 3;

/// Maximum height of the input area as a fraction of screen height.
const INPUT_HEIGHT_MAX_PERCENT: f32 = 0.4;

const PLACEHOLDER: &str = "Ask about resumes, jobs, or type /help";

/// Character-wrapped input with the visual cursor position.
struct Wrapped {
    lines: Vec<String>,
    cursor_row: usize,
    cursor_col: usize,
}

fn wrap_input(text: &str, cursor: usize, width: usize) -> Wrapped {
    let width = width.max(1);
    let mut lines = vec![String::new()];
    let mut col = 0;
    let (mut cursor_row, mut cursor_col) = (0, 0);

    for (idx, ch) in text.chars().enumerate() {
        if idx == cursor {
            cursor_row = lines.len() - 1;
            cursor_col = col;
        }
        if ch == '\n' {
            lines.push(String::new());
            col = 0;
            continue;
        }
        let w = ch.width().unwrap_or(0);
        if col + w > width {
            lines.push(String::new());
            col = 0;
            if idx == cursor {
                cursor_row = lines.len() - 1;
                cursor_col = 0;
            }
        }
        if let Some(line) = lines.last_mut() {
            line.push(ch);
        }
        col += w;
    }

    if cursor >= text.chars().count() {
        if col >= width {
            lines.push(String::new());
            col = 0;
        }
        cursor_row = lines.len() - 1;
        cursor_col = col;
    }

    Wrapped {
        lines,
        cursor_row,
        cursor_col,
    }
}

/// Height for the input box given its contents and the screen height.
pub fn calculate_input_height(input: &InputState, width: u16, screen_height: u16) -> u16 {
    let inner = width.saturating_sub(2) as usize;
    let rows = wrap_input(input.text(), input.cursor(), inner).lines.len() as u16;
    let max = ((f32::from(screen_height) * INPUT_HEIGHT_MAX_PERCENT) as u16).max(INPUT_HEIGHT_MIN);
    (rows + 2).clamp(INPUT_HEIGHT_MIN, max)
}

pub fn render_input(
    input: &InputState,
    attachments: usize,
    palette: &Palette,
    frame: &mut Frame,
    area: Rect,
) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let inner_height = area.height.saturating_sub(2) as usize;

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border())
        .title(Span::styled(" Message ", palette.accent()));
    if attachments > 0 {
        let label = if attachments == 1 {
            " 📎 1 attachment ".to_string()
        } else {
            format!(" 📎 {attachments} attachments ")
        };
        block = block.title_bottom(Line::from(Span::styled(label, palette.muted())).right_aligned());
    }

    if input.is_empty() {
        let paragraph = Paragraph::new(Line::from(Span::styled(PLACEHOLDER, palette.muted())))
            .style(palette.base())
            .block(block);
        frame.render_widget(paragraph, area);
        frame.set_cursor_position(Position::new(area.x + 1, area.y + 1));
        return;
    }

    let wrapped = wrap_input(input.text(), input.cursor(), inner_width);
    // Keep the cursor row visible.
    let skip = (wrapped.cursor_row + 1).saturating_sub(inner_height);
    let lines: Vec<Line> = wrapped
        .lines
        .into_iter()
        .skip(skip)
        .take(inner_height)
        .map(Line::from)
        .collect();

    frame.render_widget(Paragraph::new(lines).style(palette.base()).block(block), area);

    let x = area.x + 1 + wrapped.cursor_col as u16;
    let y = area.y + 1 + (wrapped.cursor_row - skip) as u16;
    frame.set_cursor_position(Position::new(x, y));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_tracks_wrapped_rows() {
        let wrapped = wrap_input("abcdef", 6, 4);
        assert_eq!(wrapped.lines, vec!["abcd", "ef"]);
        assert_eq!((wrapped.cursor_row, wrapped.cursor_col), (1, 2));

        let wrapped = wrap_input("abcd", 4, 4);
        assert_eq!(wrapped.lines, vec!["abcd", ""]);
        assert_eq!((wrapped.cursor_row, wrapped.cursor_col), (1, 0));
    }

    #[test]
    fn cursor_in_middle_after_newline() {
        let wrapped = wrap_input("ab\ncd", 4, 10);
        assert_eq!(wrapped.lines, vec!["ab", "cd"]);
        assert_eq!((wrapped.cursor_row, wrapped.cursor_col), (1, 1));
    }

    #[test]
    fn height_is_clamped() {
        let mut input = InputState::new();
        assert_eq!(calculate_input_height(&input, 40, 40), 3);
        input.set_text(&"x".repeat(38 * 30));
        assert_eq!(calculate_input_height(&input, 40, 40), 16);
    }
}
