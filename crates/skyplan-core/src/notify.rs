//! Transient user notifications
//!
//! Mutations report their outcome through a [`Notifier`]. The rendering of
//! notifications (toasts, status lines, ...) is left to the presentation layer;
//! [`NotificationCenter`] keeps the active notifications until dismissed.

use parking_lot::Mutex;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

/// Sink for user-visible notifications
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// In-memory list of active, dismissible notifications
#[derive(Default)]
pub struct NotificationCenter {
    active: Mutex<Vec<Notification>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the active notifications, oldest first
    pub fn active(&self) -> Vec<Notification> {
        self.active.lock().clone()
    }

    /// Dismiss a notification. Returns false if it was not active.
    pub fn dismiss(&self, id: Uuid) -> bool {
        let mut active = self.active.lock();
        let before = active.len();
        active.retain(|n| n.id != id);
        active.len() != before
    }

    pub fn clear(&self) {
        self.active.lock().clear();
    }
}

impl Notifier for NotificationCenter {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => {
                tracing::debug!(message = %notification.message, "notification")
            }
            NotificationLevel::Error => {
                tracing::debug!(message = %notification.message, "error notification")
            }
        }
        self.active.lock().push(notification);
    }
}
