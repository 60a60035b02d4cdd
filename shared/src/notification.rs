//! Single-slot transient notification.

use serde::{Deserialize, Serialize};

/// How long a notification stays visible
pub const NOTIFICATION_TIMEOUT_MS: u32 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}

/// One visible message at a time; showing a new one replaces the old.
///
/// Each message gets a generation number. A dismissal only clears the slot if it
/// carries the generation of the message still shown, so the timer started for
/// an older message cannot hide a newer one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationSlot {
    current: Option<(u64, Notification)>,
    generation: u64,
}

impl NotificationSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a message and return the token to dismiss it with
    pub fn show(&mut self, notification: Notification) -> u64 {
        self.generation += 1;
        self.current = Some((self.generation, notification));
        self.generation
    }

    pub fn dismiss(&mut self, token: u64) {
        if matches!(self.current, Some((generation, _)) if generation == token) {
            self.current = None;
        }
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref().map(|(_, notification)| notification)
    }

    /// Generation of the message currently shown
    pub fn token(&self) -> Option<u64> {
        self.current.as_ref().map(|(generation, _)| *generation)
    }
}
