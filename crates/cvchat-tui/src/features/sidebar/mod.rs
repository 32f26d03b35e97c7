//! Collapsible sidebar with session actions and the theme toggle.

use cvchat_core::config::Theme;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::common::Palette;

pub const EXPANDED_WIDTH: u16 = 24;
pub const COLLAPSED_WIDTH: u16 = 5;

pub fn sidebar_width(expanded: bool) -> u16 {
    if expanded {
        EXPANDED_WIDTH
    } else {
        COLLAPSED_WIDTH
    }
}

pub fn render_sidebar(
    expanded: bool,
    theme: Theme,
    resetting: bool,
    palette: &Palette,
    frame: &mut Frame,
    area: Rect,
) {
    let theme_icon = match theme {
        Theme::Dark => "☾",
        Theme::Light => "☀",
    };
    let new_icon = if resetting { "…" } else { "+" };

    let lines = if expanded {
        let item = |icon: &str, label: String, key: &'static str| {
            Line::from(vec![
                Span::styled(format!(" {icon} "), palette.accent()),
                Span::styled(label, Style::default().fg(palette.fg)),
                Span::styled(format!(" {key}"), palette.muted()),
            ])
        };
        vec![
            Line::from(Span::styled(" Career Titan", palette.accent())),
            Line::default(),
            item(new_icon, "New session".to_string(), "^N"),
            item(theme_icon, format!("Theme: {}", theme.as_str()), "^T"),
            Line::default(),
            item("R", "Resume".to_string(), "F2"),
            item("J", "Jobs".to_string(), "F3"),
        ]
    } else {
        vec![
            Line::from(Span::styled(" CT", palette.accent())),
            Line::default(),
            Line::from(Span::styled(format!(" {new_icon}"), palette.accent())),
            Line::from(Span::styled(format!(" {theme_icon}"), palette.accent())),
        ]
    };

    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(palette.border());
    frame.render_widget(
        Paragraph::new(lines).style(palette.base()).block(block),
        area,
    );
}
