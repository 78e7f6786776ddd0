//! Unified error type for SOS beacon operations
//!
//! The first four variants are the dispatch taxonomy surfaced to the user.
//! The remaining variants carry handler and configuration failures.

use serde::{Deserialize, Serialize};

/// Unified error type for all SOS beacon operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum SosError {
    /// The location-access capability was not granted
    #[error("Permission denied: {message}")]
    PermissionDenied {
        /// Error message describing the permission issue
        message: String,
    },

    /// No usable last-known location. Non-fatal for a dispatch attempt.
    #[error("Location unavailable: {message}")]
    LocationUnavailable {
        /// Error message describing why no location was produced
        message: String,
    },

    /// The record store produced no usable key
    #[error("Key generation failed: {message}")]
    KeyGenerationFailed {
        /// Error message describing the key failure
        message: String,
    },

    /// The single write attempt did not succeed
    #[error("Write failed: {message}")]
    WriteFailed {
        /// Error message describing the write failure
        message: String,
    },

    /// Invalid input or value out of range
    #[error("Invalid: {message}")]
    Invalid {
        /// Error message describing the invalid input
        message: String,
    },

    /// Network or transport error
    #[error("Network error: {message}")]
    Network {
        /// Error message describing the network issue
        message: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message describing the serialization failure
        message: String,
    },

    /// Storage operation failed
    #[error("Storage error: {message}")]
    Storage {
        /// Error message describing the storage failure
        message: String,
    },

    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {message}")]
    Config {
        /// Error message describing the configuration problem
        message: String,
    },
}

impl SosError {
    /// Create a permission denied error
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::PermissionDenied {
            message: message.into(),
        }
    }

    /// Create a location unavailable error
    pub fn location_unavailable(message: impl Into<String>) -> Self {
        Self::LocationUnavailable {
            message: message.into(),
        }
    }

    /// Create a key generation error
    pub fn key_generation(message: impl Into<String>) -> Self {
        Self::KeyGenerationFailed {
            message: message.into(),
        }
    }

    /// Create a write failure error
    pub fn write_failed(message: impl Into<String>) -> Self {
        Self::WriteFailed {
            message: message.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether this error ends a dispatch attempt.
    ///
    /// Only `LocationUnavailable` lets the attempt continue.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::LocationUnavailable { .. })
    }
}

/// Standard Result type for SOS beacon operations
pub type Result<T> = std::result::Result<T, SosError>;

impl From<serde_json::Error> for SosError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

impl From<std::io::Error> for SosError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => Self::permission_denied(err.to_string()),
            _ => Self::storage(err.to_string()),
        }
    }
}

impl From<toml::de::Error> for SosError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = SosError::key_generation("empty key");
        assert!(matches!(err, SosError::KeyGenerationFailed { .. }));
        assert_eq!(err.to_string(), "Key generation failed: empty key");
    }

    #[test]
    fn test_only_location_errors_are_recoverable() {
        assert!(!SosError::location_unavailable("no fix").is_terminal());
        assert!(SosError::permission_denied("denied").is_terminal());
        assert!(SosError::write_failed("503").is_terminal());
    }

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "locked");
        assert!(matches!(
            SosError::from(io_err),
            SosError::PermissionDenied { .. }
        ));

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(
            SosError::from(json_err),
            SosError::Serialization { .. }
        ));
    }
}
