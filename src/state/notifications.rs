//! Transient toast notifications
//!
//! Each notification carries its own deadline. Pruning removes only the
//! expired ones, so overlapping toasts never cut each other short.

use std::time::{Duration, Instant};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Info => "ℹ",
            Self::Success => "✓",
            Self::Warning => "!",
            Self::Error => "✗",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    pub kind: NotificationKind,
    pub expires_at: Instant,
}

impl Notification {
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Active notifications, oldest first
#[derive(Debug, Clone)]
pub struct Notifications {
    items: Vec<Notification>,
    default_duration: Duration,
}

impl Notifications {
    pub fn new(default_duration: Duration) -> Self {
        Self {
            items: Vec::new(),
            default_duration,
        }
    }

    /// Show a notification from `now` for the default duration
    pub fn show(&mut self, message: impl Into<String>, kind: NotificationKind, now: Instant) -> Uuid {
        self.show_at(message, kind, now, self.default_duration)
    }

    /// Show a notification that expires `duration` after `now`
    pub fn show_at(
        &mut self,
        message: impl Into<String>,
        kind: NotificationKind,
        now: Instant,
        duration: Duration,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.items.push(Notification {
            id,
            message: message.into(),
            kind,
            expires_at: now + duration,
        });
        id
    }

    /// Remove one notification before its deadline
    pub fn dismiss(&mut self, id: Uuid) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    /// Drop the newest notification (keyboard dismissal)
    pub fn dismiss_latest(&mut self) -> bool {
        self.items.pop().is_some()
    }

    /// Drop expired notifications
    pub fn prune(&mut self, now: Instant) {
        self.items.retain(|n| !n.is_expired(now));
    }

    pub fn active(&self) -> &[Notification] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(Duration::from_millis(4000))
    }
}
