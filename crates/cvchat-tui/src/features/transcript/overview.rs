//! Empty-state overview shown before the first message.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::common::Palette;

const TITLE: &str = "Career Titan";
const PITCH: &str = "Personal agents for peak productivity. Career Titan builds task-focused \
                     agents for job discovery, resume crafting, research, and outreach.";

pub fn render_overview(palette: &Palette, frame: &mut Frame, area: Rect) {
    let shortcut = |key: &'static str, label: &'static str| {
        Line::from(vec![
            Span::styled(format!(" {key} "), palette.accent()),
            Span::raw(" "),
            Span::styled(label, Style::default().fg(palette.fg)),
        ])
    };

    let lines = vec![
        Line::from(Span::styled(
            TITLE,
            palette.accent().add_modifier(Modifier::UNDERLINED),
        )),
        Line::default(),
        Line::from(Span::styled(PITCH, Style::default().fg(palette.fg))),
        Line::default(),
        shortcut("F2", "Resume Crafting"),
        shortcut("F3", "Job Search"),
    ];

    let height = (lines.len() as u16 + 2).min(area.height);
    let top = area.y + area.height.saturating_sub(height) / 2;
    let width = area.width.min(72);
    let rect = Rect {
        x: area.x + (area.width - width) / 2,
        y: top,
        width,
        height,
    };

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, rect);
}
