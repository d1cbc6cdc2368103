//! Transient notifications (toasts)

use chrono::{DateTime, Duration, Utc};
use std::collections::VecDeque;
use uuid::Uuid;

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

impl NotificationKind {
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Success => "✔",
            Self::Error => "✖",
            Self::Warning => "⚠",
            Self::Info => "ℹ",
        }
    }
}

/// Lifecycle phase of a notification at a given instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NotificationPhase {
    /// Sliding in; progress 0.0..1.0
    Entering(f32),
    Visible,
    /// Sliding out; progress 0.0..1.0
    Leaving(f32),
    Expired,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    pub kind: NotificationKind,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn phase(&self, now: DateTime<Utc>) -> NotificationPhase {
        let elapsed = now - self.created_at;
        let enter = Duration::milliseconds(NotificationQueue::ENTER_MS);
        let display = Duration::milliseconds(NotificationQueue::DISPLAY_MS);
        let exit = Duration::milliseconds(NotificationQueue::EXIT_MS);

        if elapsed < enter {
            NotificationPhase::Entering(fraction(elapsed, enter))
        } else if elapsed < display {
            NotificationPhase::Visible
        } else if elapsed < display + exit {
            NotificationPhase::Leaving(fraction(elapsed - display, exit))
        } else {
            NotificationPhase::Expired
        }
    }
}

fn fraction(part: Duration, whole: Duration) -> f32 {
    let whole = whole.num_milliseconds().max(1) as f32;
    (part.num_milliseconds().max(0) as f32 / whole).clamp(0.0, 1.0)
}

/// Stack of live notifications, oldest first
#[derive(Debug, Default)]
pub struct NotificationQueue {
    items: VecDeque<Notification>,
}

impl NotificationQueue {
    /// Slide-in time in milliseconds
    pub const ENTER_MS: i64 = 100;
    /// Time before the exit transition starts, in milliseconds
    pub const DISPLAY_MS: i64 = 4000;
    /// Slide-out time in milliseconds
    pub const EXIT_MS: i64 = 300;

    pub fn enqueue(
        &mut self,
        message: impl Into<String>,
        kind: NotificationKind,
        now: DateTime<Utc>,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.items.push_back(Notification {
            id,
            message: message.into(),
            kind,
            created_at: now,
        });
        id
    }

    /// Remove a notification before its display window ends
    pub fn dismiss(&mut self, id: Uuid) {
        self.items.retain(|n| n.id != id);
    }

    /// Drop every notification whose exit transition has finished
    pub fn expire(&mut self, now: DateTime<Utc>) {
        self.items
            .retain(|n| n.phase(now) != NotificationPhase::Expired);
    }

    /// Notifications still on screen, with their phase
    pub fn visible(&self, now: DateTime<Utc>) -> Vec<(&Notification, NotificationPhase)> {
        self.iter()
            .map(|n| (n, n.phase(now)))
            .filter(|(_, phase)| *phase != NotificationPhase::Expired)
            .collect()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    /// Most recent notification, if any
    #[cfg(test)]
    pub fn latest(&self) -> Option<&Notification> {
        self.items.back()
    }
}
