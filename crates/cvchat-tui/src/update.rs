//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use cvchat_core::attachments::attachment_from_url;
use cvchat_core::chat::{CycleUpdate, SubmitOutcome, UpdateOutcome};
use cvchat_core::panel::{PanelMode, PanelState};

use crate::common::TaskId;
use crate::common::commands::{self, Invocation, Parsed};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::input;
use crate::state::AppState;

/// The main reducer function.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            handle_tick(app, Instant::now());
            vec![]
        }
        UiEvent::Frame { width, height } => {
            app.viewport = (width, height);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::Cycle(cycle_update) => handle_cycle_update(app, cycle_update),
        UiEvent::SessionReset { task, result } => handle_session_reset(app, task, result),
        UiEvent::PanelTransitionEnd => {
            app.panel.transition_complete();
            vec![]
        }
    }
}

fn handle_tick(app: &mut AppState, now: Instant) {
    app.spinner_frame = app.spinner_frame.wrapping_add(1);
    if app.panel.tick(now) {
        tracing::debug!("panel close completed by fallback timer");
    }
    app.notifications.expire(now);
}

// ============================================================================
// Submission cycle
// ============================================================================

fn handle_cycle_update(app: &mut AppState, cycle_update: CycleUpdate) -> Vec<UiEffect> {
    match app.chat.on_update(cycle_update) {
        UpdateOutcome::Failed { notice } => {
            app.notifications.error(notice);
            vec![]
        }
        UpdateOutcome::Finished => match app.input.pop_queued_prompt() {
            Some(next) => submit_prompt(app, &next),
            None => vec![],
        },
        UpdateOutcome::Stale
        | UpdateOutcome::Opened
        | UpdateOutcome::Applied(_) => vec![],
    }
}

/// Sends `text` now, or queues it while a cycle is running.
fn submit_prompt(app: &mut AppState, text: &str) -> Vec<UiEffect> {
    if app.chat.is_busy() {
        app.input.enqueue_prompt(text.to_string());
        app.notifications
            .info("Queued; it will be sent when the current reply finishes");
        return vec![];
    }

    let attachments = std::mem::take(&mut app.pending_attachments);
    match app.chat.begin(text, attachments) {
        SubmitOutcome::Ignored => vec![],
        SubmitOutcome::Busy(text) => {
            app.input.enqueue_prompt(text);
            vec![]
        }
        SubmitOutcome::Started(prepared) => {
            tracing::info!(cycle = %prepared.cycle, "submitting prompt");
            app.scroll_from_bottom = 0;
            vec![UiEffect::StartCycle(prepared)]
        }
    }
}

fn submit_input(app: &mut AppState) -> Vec<UiEffect> {
    if app.input.text().trim().is_empty() {
        return vec![];
    }
    let text = app.input.take_text();

    match commands::parse(&text) {
        Some(Parsed::Command(invocation)) => run_command(app, &invocation),
        Some(Parsed::Unknown(name)) => {
            app.notifications
                .error(format!("Unknown command: /{name}. Try /help"));
            vec![]
        }
        None => {
            app.input.push_history(&text);
            submit_prompt(app, &text)
        }
    }
}

// ============================================================================
// Session reset
// ============================================================================

fn start_reset(app: &mut AppState) -> Vec<UiEffect> {
    if app.reset_task.is_running() {
        app.notifications.info("Session reset already in progress");
        return vec![];
    }
    let task = app.task_seq.next_id();
    app.reset_task.start(task);
    vec![UiEffect::ResetSession {
        task,
        chat_id: app.chat.chat_id().to_string(),
    }]
}

fn handle_session_reset(
    app: &mut AppState,
    task: TaskId,
    result: Result<(), String>,
) -> Vec<UiEffect> {
    if !app.reset_task.finish_if_active(task) {
        return vec![];
    }

    match result {
        Ok(()) => {
            app.chat.reset();
            app.panel.reset();
            app.input.queued.clear();
            app.pending_attachments.clear();
            app.scroll_from_bottom = 0;
            app.notifications.success("New session started");
        }
        Err(e) => {
            app.notifications
                .error(format!("Failed to reset session: {e}"));
        }
    }
    vec![]
}

// ============================================================================
// Commands
// ============================================================================

fn run_command(app: &mut AppState, invocation: &Invocation<'_>) -> Vec<UiEffect> {
    let now = Instant::now();
    match invocation.name {
        "attach" => {
            attach(app, &invocation.args);
            vec![]
        }
        "close" => {
            app.panel.close(now);
            vec![]
        }
        "help" => {
            app.notifications.info(commands::help_text());
            vec![]
        }
        "jobs" => {
            app.panel.open(PanelMode::Job, now);
            vec![]
        }
        "resume" => {
            app.panel.open(PanelMode::Resume, now);
            vec![]
        }
        "new" => start_reset(app),
        "quit" => vec![UiEffect::Quit],
        "theme" => toggle_theme(app),
        other => {
            tracing::warn!(command = other, "command has no handler");
            vec![]
        }
    }
}

fn attach(app: &mut AppState, args: &[&str]) {
    let Some((url, name)) = args.split_first() else {
        app.notifications.error("Usage: /attach <url> [name]");
        return;
    };
    let name = name.join(" ");
    let name = (!name.is_empty()).then_some(name.as_str());

    match attachment_from_url(url, name) {
        Ok(attachment) => {
            app.notifications
                .success(format!("Attached {}", attachment.name));
            app.pending_attachments
                .retain(|existing| existing.url != attachment.url);
            app.pending_attachments.push(attachment);
        }
        Err(e) => app.notifications.error(format!("{e:#}")),
    }
}

fn toggle_theme(app: &mut AppState) -> Vec<UiEffect> {
    app.theme = app.theme.toggled();
    vec![UiEffect::PersistTheme { theme: app.theme }]
}

// ============================================================================
// Terminal Event Handlers
// ============================================================================

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        Event::Paste(text) => {
            input::handle_paste(&mut app.input, &text);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let now = Instant::now();
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('c') if ctrl => vec![UiEffect::Quit],
        KeyCode::Char('b') if ctrl => {
            app.sidebar_expanded = !app.sidebar_expanded;
            vec![]
        }
        KeyCode::Char('n') if ctrl => start_reset(app),
        KeyCode::Char('t') if ctrl => toggle_theme(app),
        KeyCode::F(2) => {
            app.panel.open(PanelMode::Resume, now);
            vec![]
        }
        KeyCode::F(3) => {
            app.panel.open(PanelMode::Job, now);
            vec![]
        }
        KeyCode::Esc => {
            if matches!(app.panel.state(), PanelState::Open | PanelState::Opening) {
                app.panel.close(now);
            } else {
                app.input.clear();
            }
            vec![]
        }
        KeyCode::PageUp => {
            app.scroll_from_bottom = app.scroll_from_bottom.saturating_add(page_size(app));
            vec![]
        }
        KeyCode::PageDown => {
            app.scroll_from_bottom = app.scroll_from_bottom.saturating_sub(page_size(app));
            vec![]
        }
        KeyCode::Enter if key.modifiers.contains(KeyModifiers::SHIFT) => {
            app.input.insert_char('\n');
            vec![]
        }
        KeyCode::Enter => submit_input(app),
        _ => {
            input::handle_edit_key(&mut app.input, key);
            vec![]
        }
    }
}

fn page_size(app: &AppState) -> usize {
    (usize::from(app.viewport.1) / 2).max(1)
}
