//! Transcript rendering.
//!
//! Turns the conversation into pre-wrapped `Line`s. Scrolling and layout
//! are handled by the top-level renderer.

use cvchat_core::chat::SubmissionController;
use cvchat_types::{Message, Role};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::common::{Palette, sanitize_for_display, wrap_text};

/// Spinner speed divisor (render ticks per spinner frame).
pub const SPINNER_SPEED_DIVISOR: usize = 6;

pub const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Indent for message bodies under the role label.
const BODY_INDENT: &str = "  ";

pub fn spinner_glyph(spinner_frame: usize) -> &'static str {
    SPINNER_FRAMES[(spinner_frame / SPINNER_SPEED_DIVISOR) % SPINNER_FRAMES.len()]
}

/// Renders all messages at `width` columns.
pub fn render_transcript(
    chat: &SubmissionController,
    palette: &Palette,
    spinner_frame: usize,
    width: usize,
) -> Vec<Line<'static>> {
    let body_width = width.saturating_sub(BODY_INDENT.len()).max(1);
    let conversation = chat.conversation();
    let messages = conversation.messages();
    let active_id = chat.active_assistant_id();
    let mut lines = Vec::new();

    for message in messages {
        lines.push(role_label(message.role, palette));

        let thinking = chat.side_channels().thinking(&message.id);
        for note in thinking {
            push_wrapped(
                &mut lines,
                &format!("… {note}"),
                body_width,
                palette.muted().add_modifier(Modifier::ITALIC),
            );
        }

        // Only the message of the running cycle is still waiting; empty
        // placeholders left by failed cycles render as blank.
        if active_id == Some(&message.id) && message.content.is_empty() {
            lines.push(thinking_line(palette, spinner_frame));
        } else {
            let errored = conversation.is_errored(&message.id);
            push_content(&mut lines, message, errored, palette, body_width);
        }

        for attachment in &message.attachments {
            let text = format!("📎 {} ({})", attachment.name, attachment.url);
            push_wrapped(&mut lines, &text, body_width, Style::default().fg(palette.accent));
        }

        lines.push(Line::default());
    }

    let last_is_user = messages.last().is_some_and(|m| m.role == Role::User);
    if chat.is_busy() && last_is_user {
        lines.push(role_label(Role::Assistant, palette));
        lines.push(thinking_line(palette, spinner_frame));
    }

    lines
}

fn role_label(role: Role, palette: &Palette) -> Line<'static> {
    let (label, color) = match role {
        Role::User => ("You", palette.user),
        Role::Assistant => ("Career Titan", palette.accent),
        Role::System => ("System", palette.muted),
    };
    Line::from(Span::styled(
        label,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
}

fn thinking_line(palette: &Palette, spinner_frame: usize) -> Line<'static> {
    Line::from(vec![
        Span::raw(BODY_INDENT),
        Span::styled(
            format!("{} Thinking…", spinner_glyph(spinner_frame)),
            Style::default().fg(palette.info),
        ),
    ])
}

fn push_content(
    lines: &mut Vec<Line<'static>>,
    message: &Message,
    errored: bool,
    palette: &Palette,
    width: usize,
) {
    let style = match message.role {
        _ if errored => Style::default().fg(palette.error),
        Role::User => Style::default().fg(palette.user),
        Role::Assistant => Style::default().fg(palette.assistant),
        Role::System => palette.muted(),
    };
    push_wrapped(lines, &sanitize_for_display(&message.content), width, style);
}

fn push_wrapped(lines: &mut Vec<Line<'static>>, text: &str, width: usize, style: Style) {
    for row in wrap_text(text, width) {
        lines.push(Line::from(vec![
            Span::raw(BODY_INDENT),
            Span::styled(row, style),
        ]));
    }
}

#[cfg(test)]
mod tests {
    use cvchat_core::chat::{CycleUpdate, SubmitOutcome};
    use cvchat_core::client::ClientError;
    use cvchat_core::config::Theme;
    use cvchat_types::{Attachment, ChatEvent};

    use super::*;

    fn plain(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    fn palette() -> Palette {
        Palette::for_theme(Theme::Dark)
    }

    #[test]
    fn busy_with_trailing_user_message_shows_spinner() {
        let mut chat = SubmissionController::new("c1");
        let SubmitOutcome::Started(_) = chat.begin("hello", Vec::new()) else {
            panic!("expected start");
        };

        let text = plain(&render_transcript(&chat, &palette(), 0, 40));
        assert_eq!(text[0], "You");
        assert_eq!(text[1], "  hello");
        assert!(text.iter().any(|l| l.contains("Thinking…")));
    }

    fn content_style(lines: &[Line<'_>], text: &str) -> Style {
        lines
            .iter()
            .flat_map(|l| l.spans.iter())
            .find(|s| s.content == text)
            .map(|s| s.style)
            .expect("span present")
    }

    fn finish_with(chat: &mut SubmissionController, prompt: &str, event: ChatEvent) {
        let SubmitOutcome::Started(prepared) = chat.begin(prompt, Vec::new()) else {
            panic!("expected start");
        };
        let cycle = prepared.cycle;
        chat.on_update(CycleUpdate::Opened { cycle });
        chat.on_update(CycleUpdate::Event { cycle, event });
        chat.on_update(CycleUpdate::Finished { cycle });
    }

    #[test]
    fn failed_cycle_placeholder_has_no_spinner_during_next_cycle() {
        let mut chat = SubmissionController::new("c1");
        let SubmitOutcome::Started(first) = chat.begin("first", Vec::new()) else {
            panic!("expected start");
        };
        chat.on_update(CycleUpdate::Opened { cycle: first.cycle });
        chat.on_update(CycleUpdate::Failed {
            cycle: first.cycle,
            error: ClientError::stream("reset by peer"),
        });
        chat.on_update(CycleUpdate::Finished { cycle: first.cycle });

        let SubmitOutcome::Started(second) = chat.begin("second", Vec::new()) else {
            panic!("expected start");
        };
        chat.on_update(CycleUpdate::Opened { cycle: second.cycle });

        let text = plain(&render_transcript(&chat, &palette(), 0, 40));
        let spinners = text.iter().filter(|l| l.contains("Thinking…")).count();
        assert_eq!(spinners, 1);
        let second_pos = text.iter().position(|l| l == "  second").expect("second prompt");
        let spinner_pos = text.iter().position(|l| l.contains("Thinking…")).expect("spinner");
        assert!(spinner_pos > second_pos);
    }

    #[test]
    fn error_event_reply_uses_error_color() {
        let palette = palette();
        let mut chat = SubmissionController::new("c1");
        finish_with(
            &mut chat,
            "hi",
            ChatEvent::Error {
                message: "quota exceeded".into(),
            },
        );

        let lines = render_transcript(&chat, &palette, 0, 60);
        let style = content_style(&lines, "Error: quota exceeded");
        assert_eq!(style.fg, Some(palette.error));
    }

    #[test]
    fn final_reply_starting_with_error_keeps_assistant_color() {
        let palette = palette();
        let mut chat = SubmissionController::new("c1");
        finish_with(
            &mut chat,
            "hi",
            ChatEvent::Final {
                response: "Error: handling is a key skill".into(),
            },
        );

        let lines = render_transcript(&chat, &palette, 0, 60);
        let style = content_style(&lines, "Error: handling is a key skill");
        assert_eq!(style.fg, Some(palette.assistant));
    }

    #[test]
    fn finalized_reply_shows_thinking_and_attachment() {
        let mut chat = SubmissionController::new("c1");
        let SubmitOutcome::Started(prepared) = chat.begin("make a cv", Vec::new()) else {
            panic!("expected start");
        };
        let cycle = prepared.cycle;
        chat.on_update(CycleUpdate::Opened { cycle });
        chat.on_update(CycleUpdate::Event {
            cycle,
            event: ChatEvent::Thinking(Some("drafting".into())),
        });
        chat.on_update(CycleUpdate::Event {
            cycle,
            event: ChatEvent::ResumeReady(Some(Attachment::new(
                "https://f/cv.pdf",
                "cv.pdf",
                "application/pdf",
            ))),
        });
        chat.on_update(CycleUpdate::Event {
            cycle,
            event: ChatEvent::Final {
                response: "Done".into(),
            },
        });
        chat.on_update(CycleUpdate::Finished { cycle });

        let text = plain(&render_transcript(&chat, &palette(), 0, 60));
        assert!(text.contains(&"  … drafting".to_string()));
        assert!(text.contains(&"  Done".to_string()));
        assert!(text.contains(&"  📎 cv.pdf (https://f/cv.pdf)".to_string()));
        assert!(!text.iter().any(|l| l.contains("Thinking…")));
    }
}
