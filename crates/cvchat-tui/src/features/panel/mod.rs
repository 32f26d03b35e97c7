//! Side panel view. State lives in `cvchat_core::panel::PanelController`.

use std::time::Instant;

use cvchat_core::panel::{PanelController, PanelMode};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::common::Palette;

/// Share of the screen width the panel takes when fully open.
const PANEL_WIDTH_PERCENT: f32 = 0.5;

/// Current panel width in columns for a screen `total` columns wide.
pub fn panel_width(panel: &PanelController, total: u16, now: Instant) -> u16 {
    if !panel.is_visible() {
        return 0;
    }
    let full = f32::from(total) * PANEL_WIDTH_PERCENT;
    (full * panel.progress(now)).round() as u16
}

fn body(mode: PanelMode) -> [&'static str; 2] {
    match mode {
        PanelMode::Resume => [
            "AI-powered resume optimization and generation tools will be available here.",
            "Coming soon: Resume analysis, optimization suggestions, and professional formatting.",
        ],
        PanelMode::Job => [
            "Advanced job search and matching tools will be available here.",
            "Coming soon: Job database, advanced filters, and personalized recommendations.",
        ],
        PanelMode::None => ["", ""],
    }
}

pub fn render_panel(panel: &PanelController, palette: &Palette, frame: &mut Frame, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let mode = panel.mode();
    let [summary, upcoming] = body(mode);
    let lines = vec![
        Line::default(),
        Line::from(Span::styled(summary, Style::default().fg(palette.fg))),
        Line::default(),
        Line::from(Span::styled(upcoming, palette.muted())),
    ];

    let block = Block::default()
        .borders(Borders::LEFT | Borders::TOP | Borders::BOTTOM)
        .border_style(palette.border())
        .title(Span::styled(format!(" {} ", mode.title()), palette.accent()))
        .title_bottom(Line::from(Span::styled(" Esc close ", palette.muted())).right_aligned());

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines)
            .style(palette.base())
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}
