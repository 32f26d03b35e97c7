//! Transient toast notifications.

mod render;

use std::collections::VecDeque;
use std::time::{Duration, Instant};

pub use render::render_toasts;

/// How long a toast stays on screen.
pub const TOAST_TTL: Duration = Duration::from_secs(4);

/// At most this many toasts are kept; older ones are dropped first.
const MAX_TOASTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub expires_at: Instant,
}

#[derive(Debug, Default)]
pub struct Notifications {
    toasts: VecDeque<Toast>,
}

impl Notifications {
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>, now: Instant) {
        let message = message.into();
        match kind {
            ToastKind::Error => tracing::warn!(%message, "toast"),
            ToastKind::Success | ToastKind::Info => tracing::debug!(%message, "toast"),
        }
        self.toasts.push_back(Toast {
            kind,
            message,
            expires_at: now + TOAST_TTL,
        });
        while self.toasts.len() > MAX_TOASTS {
            self.toasts.pop_front();
        }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Success, message, Instant::now());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Error, message, Instant::now());
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Info, message, Instant::now());
    }

    /// Drops expired toasts. Returns true if any were removed.
    pub fn expire(&mut self, now: Instant) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.expires_at > now);
        self.toasts.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn clear(&mut self) {
        self.toasts.clear();
    }
}
