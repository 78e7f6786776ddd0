//! User-visible notification texts

use sos_core::Notification;

/// Location access was refused
pub const PERMISSION_DENIED: &str = "Location permission denied.";
/// No last known location; the record is sent anyway
pub const LOCATION_FAILED: &str = "Failed to get location.";
/// The store produced no key
pub const KEY_FAILED: &str = "Failed to generate a unique key.";
/// The record was written
pub const SOS_SENT: &str = "SOS message sent successfully!";
/// The write failed
pub const SOS_FAILED: &str = "Failed to send SOS. Please try again.";

/// Every notification the dispatcher can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// [`PERMISSION_DENIED`]
    PermissionDenied,
    /// [`LOCATION_FAILED`]
    LocationFailed,
    /// [`KEY_FAILED`]
    KeyFailed,
    /// [`SOS_SENT`]
    Sent,
    /// [`SOS_FAILED`]
    SendFailed,
}

impl Notice {
    /// Text shown to the user
    pub fn text(self) -> &'static str {
        match self {
            Self::PermissionDenied => PERMISSION_DENIED,
            Self::LocationFailed => LOCATION_FAILED,
            Self::KeyFailed => KEY_FAILED,
            Self::Sent => SOS_SENT,
            Self::SendFailed => SOS_FAILED,
        }
    }

    /// The notification carrying this text at its level
    pub fn notification(self) -> Notification {
        match self {
            Self::Sent => Notification::success(self.text()),
            Self::LocationFailed => Notification::warning(self.text()),
            Self::PermissionDenied | Self::KeyFailed | Self::SendFailed => {
                Notification::error(self.text())
            }
        }
    }
}
