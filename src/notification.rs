//! Transient notification shown at the bottom of the window.

use std::time::{Duration, Instant};

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Error,
}

/// A message for the notification surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Success,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Info,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
        }
    }
}

/// Holds at most one notification and hides it after a fixed interval.
///
/// Only [`Notifier::dismiss`] or the timeout removes the current
/// notification. A new notification replaces the current one.
#[derive(Debug)]
pub struct Notifier {
    current: Option<(Notification, Instant)>,
    auto_hide: Duration,
}

impl Notifier {
    pub fn new(auto_hide: Duration) -> Self {
        Self {
            current: None,
            auto_hide,
        }
    }

    pub fn show(&mut self, notification: Notification) {
        self.show_at(notification, Instant::now());
    }

    pub fn show_at(&mut self, notification: Notification, now: Instant) {
        tracing::debug!("Notification: {}", notification.message);
        self.current = Some((notification, now));
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Drop the notification once its interval has elapsed.
    pub fn expire(&mut self, now: Instant) {
        if let Some((_, shown_at)) = &self.current
            && now.duration_since(*shown_at) >= self.auto_hide
        {
            self.current = None;
        }
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref().map(|(n, _)| n)
    }

    /// Time left before the current notification hides itself.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.current
            .as_ref()
            .map(|(_, shown_at)| self.auto_hide.saturating_sub(now.duration_since(*shown_at)))
    }
}
