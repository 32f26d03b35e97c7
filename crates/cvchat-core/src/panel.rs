//! Side panel visibility and slide animation.
//!
//! `closed → opening → open → closing → closed`. The renderer acknowledges
//! the end of each slide with [`PanelController::transition_complete`]; a
//! fallback deadline makes sure a close finishes even if that never happens.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Default slide duration.
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(300);

/// Default time after which a close completes without acknowledgement.
pub const DEFAULT_CLOSE_FALLBACK: Duration = Duration::from_millis(320);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Closed,
    Opening,
    Open,
    Closing,
}

/// What the panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelMode {
    #[default]
    None,
    Resume,
    Job,
}

impl PanelMode {
    pub fn title(self) -> &'static str {
        match self {
            PanelMode::None => "",
            PanelMode::Resume => "Resume Crafting",
            PanelMode::Job => "Job Search",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelTimings {
    pub transition: Duration,
    pub close_fallback: Duration,
}

impl Default for PanelTimings {
    fn default() -> Self {
        Self {
            transition: DEFAULT_TRANSITION,
            close_fallback: DEFAULT_CLOSE_FALLBACK,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PanelController {
    state: PanelState,
    mode: PanelMode,
    timings: PanelTimings,
    /// Start of the running slide and the width it started from.
    slide: Option<(Instant, f32)>,
    close_deadline: Option<Instant>,
}

impl Default for PanelController {
    fn default() -> Self {
        Self::new(PanelTimings::default())
    }
}

impl PanelController {
    pub fn new(timings: PanelTimings) -> Self {
        Self {
            state: PanelState::Closed,
            mode: PanelMode::None,
            timings,
            slide: None,
            close_deadline: None,
        }
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    /// Current mode; meaningful only while not closed.
    pub fn mode(&self) -> PanelMode {
        self.mode
    }

    pub fn is_visible(&self) -> bool {
        self.state != PanelState::Closed
    }

    /// Opens the panel in `mode`, or switches mode if already showing.
    pub fn open(&mut self, mode: PanelMode, now: Instant) {
        if mode == PanelMode::None {
            tracing::debug!("ignoring panel open without a mode");
            return;
        }

        match self.state {
            PanelState::Closed => {
                self.state = PanelState::Opening;
                self.slide = Some((now, 0.0));
            }
            PanelState::Opening | PanelState::Open => {}
            PanelState::Closing => {
                let from = self.progress(now);
                self.state = PanelState::Opening;
                self.slide = Some((now, from));
                self.close_deadline = None;
            }
        }
        self.mode = mode;
    }

    /// Acknowledges the end of the running slide.
    pub fn transition_complete(&mut self) {
        match self.state {
            PanelState::Opening => {
                self.state = PanelState::Open;
                self.slide = None;
            }
            PanelState::Closing => self.finish_close(),
            PanelState::Closed | PanelState::Open => {}
        }
    }

    pub fn close(&mut self, now: Instant) {
        match self.state {
            PanelState::Open | PanelState::Opening => {
                let from = self.progress(now);
                self.state = PanelState::Closing;
                self.slide = Some((now, from));
                self.close_deadline = Some(now + self.timings.close_fallback);
            }
            PanelState::Closed | PanelState::Closing => {}
        }
    }

    /// Completes a close whose fallback deadline has passed.
    ///
    /// Returns true when the state changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.state == PanelState::Closing
            && let Some(deadline) = self.close_deadline
            && now >= deadline
        {
            self.finish_close();
            return true;
        }
        false
    }

    /// True while a slide is running and its duration has elapsed, i.e. the
    /// renderer has drawn the final frame and may acknowledge it.
    pub fn slide_settled(&self, now: Instant) -> bool {
        matches!(self.state, PanelState::Opening | PanelState::Closing)
            && self
                .slide
                .is_some_and(|(start, _)| now.saturating_duration_since(start) >= self.timings.transition)
    }

    /// Fraction of the full panel width to draw, `0.0..=1.0`.
    pub fn progress(&self, now: Instant) -> f32 {
        let t = self.slide.map_or(1.0, |(start, _)| {
            let elapsed = now.saturating_duration_since(start).as_secs_f32();
            let total = self.timings.transition.as_secs_f32();
            if total <= 0.0 {
                1.0
            } else {
                (elapsed / total).clamp(0.0, 1.0)
            }
        });
        let from = self.slide.map_or(0.0, |(_, from)| from);

        match self.state {
            PanelState::Closed => 0.0,
            PanelState::Open => 1.0,
            PanelState::Opening => from + (1.0 - from) * ease_out(t),
            PanelState::Closing => from * (1.0 - ease_out(t)),
        }
    }

    pub fn reset(&mut self) {
        self.finish_close();
    }

    fn finish_close(&mut self) {
        self.state = PanelState::Closed;
        self.mode = PanelMode::None;
        self.slide = None;
        self.close_deadline = None;
    }
}

fn ease_out(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(2)
}
