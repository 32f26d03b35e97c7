//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui `Frame`, and never
//! mutate state or return effects.

use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::common::{Palette, truncate_with_ellipsis};
use crate::features::{input, notifications, panel, sidebar, transcript};
use crate::state::AppState;

/// Height of status line below input.
const STATUS_HEIGHT: u16 = 1;

/// Max queued prompts to display in the queue panel.
const QUEUE_MAX_ITEMS: usize = 3;

/// Horizontal margin for the transcript area (left and right).
const TRANSCRIPT_MARGIN: u16 = 1;

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    render_at(app, frame, Instant::now());
}

pub fn render_at(app: &AppState, frame: &mut Frame, now: Instant) {
    let area = frame.area();
    let palette = Palette::for_theme(app.theme);
    frame.render_widget(Block::default().style(palette.base()), area);

    let sidebar_width = sidebar::sidebar_width(app.sidebar_expanded).min(area.width);
    let rest = area.width - sidebar_width;
    let panel_width = panel::panel_width(&app.panel, rest, now);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(sidebar_width),
            Constraint::Min(1),
            Constraint::Length(panel_width),
        ])
        .split(area);

    sidebar::render_sidebar(
        app.sidebar_expanded,
        app.theme,
        app.reset_task.is_running(),
        &palette,
        frame,
        columns[0],
    );
    render_main(app, &palette, frame, columns[1]);
    if panel_width > 0 {
        panel::render_panel(&app.panel, &palette, frame, columns[2]);
    }

    notifications::render_toasts(&app.notifications, &palette, frame, area);
}

fn render_main(app: &AppState, palette: &Palette, frame: &mut Frame, area: Rect) {
    let input_height = input::calculate_input_height(&app.input, area.width, area.height);
    let queue_summaries = app.input.queued_summaries(QUEUE_MAX_ITEMS);
    let queue_height = if queue_summaries.is_empty() {
        0
    } else {
        queue_summaries.len() as u16 + 2
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(queue_height),
            Constraint::Length(input_height),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(area);

    let transcript_area = Rect {
        x: chunks[0].x + TRANSCRIPT_MARGIN,
        y: chunks[0].y,
        width: chunks[0].width.saturating_sub(TRANSCRIPT_MARGIN * 2),
        height: chunks[0].height,
    };
    if app.chat.conversation().is_empty() && !app.chat.is_busy() {
        transcript::render_overview(palette, frame, transcript_area);
    } else {
        render_transcript(app, palette, frame, transcript_area);
    }

    if queue_height > 0 {
        render_queue_panel(
            palette,
            frame,
            chunks[1],
            &queue_summaries,
            app.input.queued.len(),
        );
    }

    input::render_input(
        &app.input,
        app.pending_attachments.len(),
        palette,
        frame,
        chunks[2],
    );
    render_status_line(app, palette, frame, chunks[3]);
}

fn render_transcript(app: &AppState, palette: &Palette, frame: &mut Frame, area: Rect) {
    let height = area.height as usize;
    let lines = transcript::render_transcript(
        &app.chat,
        palette,
        app.spinner_frame,
        area.width as usize,
    );

    let total = lines.len();
    let max_scroll = total.saturating_sub(height);
    let from_bottom = app.scroll_from_bottom.min(max_scroll);
    let end = total - from_bottom;
    let start = end.saturating_sub(height);

    let mut visible: Vec<Line<'static>> = lines.into_iter().skip(start).take(end - start).collect();
    // Bottom-align when content doesn't fill the screen.
    if visible.len() < height {
        let mut padded = vec![Line::default(); height - visible.len()];
        padded.append(&mut visible);
        visible = padded;
    }

    frame.render_widget(Paragraph::new(visible).style(palette.base()), area);
}

/// Renders the status line below the input.
fn render_status_line(app: &AppState, palette: &Palette, frame: &mut Frame, area: Rect) {
    let spinner = transcript::spinner_glyph(app.spinner_frame);
    let key = |k: &'static str| Span::styled(k, palette.muted());

    let spans: Vec<Span> = if app.chat.is_busy() {
        vec![
            Span::styled(spinner, Style::default().fg(palette.info)),
            Span::raw(" "),
            Span::styled("Waiting for reply...", Style::default().fg(palette.info)),
            Span::raw("  "),
            key("Enter"),
            Span::raw(" queue"),
        ]
    } else if app.reset_task.is_running() {
        vec![
            Span::styled(spinner, Style::default().fg(palette.accent)),
            Span::raw(" "),
            Span::styled("Resetting session...", Style::default().fg(palette.accent)),
        ]
    } else {
        vec![
            key("Enter"),
            Span::raw(" send  "),
            key("F2"),
            Span::raw(" resume  "),
            key("F3"),
            Span::raw(" jobs  "),
            key("Ctrl+B"),
            Span::raw(" sidebar  "),
            key("Ctrl+C"),
            Span::raw(" quit"),
        ]
    };

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(palette.base()),
        area,
    );
}

/// Renders the queued prompt summary panel between transcript and input.
fn render_queue_panel(
    palette: &Palette,
    frame: &mut Frame,
    area: Rect,
    summaries: &[String],
    total: usize,
) {
    if summaries.is_empty() || area.height == 0 {
        return;
    }

    // Borders (2) plus the "- " bullet.
    let inner_width = area.width.saturating_sub(4) as usize;
    let lines: Vec<Line<'static>> = summaries
        .iter()
        .map(|line| {
            Line::from(vec![
                Span::styled("- ", palette.muted()),
                Span::styled(
                    truncate_with_ellipsis(line, inner_width),
                    Style::default().fg(palette.fg),
                ),
            ])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border())
        .title(Span::styled(format!(" Queued ({total}) "), palette.muted()));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use cvchat_core::config::Config;
    use cvchat_core::panel::PanelMode;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;

    fn draw(app: &AppState, width: u16, height: u16, now: Instant) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
        terminal
            .draw(|frame| render_at(app, frame, now))
            .expect("draw");
        let buffer = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn empty_conversation_shows_overview() {
        let app = AppState::new(&Config::default(), "c1");
        let screen = draw(&app, 100, 30, Instant::now());
        assert!(screen.contains("Career Titan"));
        assert!(screen.contains("Resume Crafting"));
        assert!(screen.contains("Job Search"));
    }

    #[test]
    fn open_panel_shows_mode_title() {
        let mut app = AppState::new(&Config::default(), "c1");
        let now = Instant::now();
        app.panel.open(PanelMode::Job, now);
        app.panel.transition_complete();

        let screen = draw(&app, 120, 30, now);
        assert!(screen.contains("Job Search"));
        assert!(screen.contains("Advanced job search"));
    }

    #[test]
    fn queued_prompts_are_listed() {
        let mut app = AppState::new(&Config::default(), "c1");
        app.input.enqueue_prompt("follow up".to_string());
        let screen = draw(&app, 100, 30, Instant::now());
        assert!(screen.contains("Queued (1)"));
        assert!(screen.contains("- follow up"));
    }
}
