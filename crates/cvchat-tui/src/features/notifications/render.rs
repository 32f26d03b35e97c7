use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::{Notifications, ToastKind};
use crate::common::{Palette, truncate_with_ellipsis};

const TOAST_MAX_WIDTH: u16 = 48;
const TOAST_HEIGHT: u16 = 3;

/// Draws toasts stacked in the top-right corner of `area`, newest last.
pub fn render_toasts(notes: &Notifications, palette: &Palette, frame: &mut Frame, area: Rect) {
    let width = TOAST_MAX_WIDTH.min(area.width.saturating_sub(2));
    if width < 8 {
        return;
    }

    let mut y = area.y + 1;
    for toast in notes.iter() {
        if y + TOAST_HEIGHT > area.y + area.height {
            break;
        }

        let (label, color) = match toast.kind {
            ToastKind::Success => ("✓", palette.success),
            ToastKind::Error => ("✗", palette.error),
            ToastKind::Info => ("i", palette.info),
        };
        let text = truncate_with_ellipsis(&toast.message, width.saturating_sub(6) as usize);
        let line = Line::from(vec![
            Span::styled(format!(" {label} "), Style::default().fg(color)),
            Span::raw(text),
        ]);

        let rect = Rect {
            x: area.x + area.width - width - 1,
            y,
            width,
            height: TOAST_HEIGHT,
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color));
        frame.render_widget(Clear, rect);
        frame.render_widget(Paragraph::new(line).style(palette.base()).block(block), rect);
        y += TOAST_HEIGHT;
    }
}
