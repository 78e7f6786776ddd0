//! Notification effect handler
//!
//! Prints each notification as a one-line toast on stderr and mirrors it
//! into the tracing stream at the matching level.

use async_trait::async_trait;
use sos_core::{Notification, NotificationEffects, NotificationLevel};

/// Console toast handler
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotificationHandler {
    quiet: bool,
}

impl ConsoleNotificationHandler {
    /// Handler that prints toasts
    pub fn new() -> Self {
        Self::default()
    }

    /// Only emit tracing events, print nothing
    pub fn quiet() -> Self {
        Self { quiet: true }
    }
}

#[async_trait]
impl NotificationEffects for ConsoleNotificationHandler {
    async fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Info | NotificationLevel::Success => {
                tracing::info!(level = ?notification.level, "{}", notification.message);
            }
            NotificationLevel::Warning => tracing::warn!("{}", notification.message),
            NotificationLevel::Error => tracing::error!("{}", notification.message),
        }
        if !self.quiet {
            eprintln!("{notification}");
        }
    }
}
