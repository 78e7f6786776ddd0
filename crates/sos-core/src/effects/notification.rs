//! Notification effect interface for transient user-visible messages
//!
//! # Effect Classification
//!
//! - **Category**: Infrastructure Effect
//! - **Implementation**: `sos-effects` (console toast)
//! - **Usage**: Every dispatcher outcome the user has to see

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Notification severity level
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationLevel {
    #[default]
    /// Neutral information
    Info,
    /// The action completed
    Success,
    /// Degraded but continuing
    Warning,
    /// The action failed
    Error,
}

impl NotificationLevel {
    /// Indicator symbol for this level
    pub fn icon(self) -> &'static str {
        match self {
            Self::Info => "ℹ",
            Self::Success => "✓",
            Self::Warning => "⚠",
            Self::Error => "✗",
        }
    }
}

/// A transient message shown to the user
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Severity
    pub level: NotificationLevel,
    /// Text shown to the user
    pub message: String,
}

impl Notification {
    /// Notification at `level`
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    /// Success toast
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, message)
    }

    /// Warning toast
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Warning, message)
    }

    /// Error toast
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, message)
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.level.icon(), self.message)
    }
}

/// Surface for transient notifications
#[async_trait]
pub trait NotificationEffects: Send + Sync {
    /// Show `notification`. Delivery is best effort and never fails the caller.
    async fn notify(&self, notification: Notification);
}

/// Blanket implementation for Arc<T> where T: NotificationEffects
#[async_trait]
impl<T: NotificationEffects + ?Sized> NotificationEffects for Arc<T> {
    async fn notify(&self, notification: Notification) {
        (**self).notify(notification).await;
    }
}
