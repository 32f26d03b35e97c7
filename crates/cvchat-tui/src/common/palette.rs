//! Colors for the two UI themes.

use cvchat_core::config::Theme;
use ratatui::style::{Color, Modifier, Style};

/// Resolved colors for one theme.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub fg: Color,
    pub bg: Color,
    pub muted: Color,
    pub accent: Color,
    pub user: Color,
    pub assistant: Color,
    pub border: Color,
    pub success: Color,
    pub error: Color,
    pub info: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                fg: Color::Gray,
                bg: Color::Reset,
                muted: Color::DarkGray,
                accent: Color::Cyan,
                user: Color::LightBlue,
                assistant: Color::White,
                border: Color::DarkGray,
                success: Color::Green,
                error: Color::Red,
                info: Color::Yellow,
            },
            Theme::Light => Self {
                fg: Color::Black,
                bg: Color::White,
                muted: Color::Gray,
                accent: Color::Blue,
                user: Color::Blue,
                assistant: Color::Black,
                border: Color::Gray,
                success: Color::Green,
                error: Color::Red,
                info: Color::Magenta,
            },
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }
}
