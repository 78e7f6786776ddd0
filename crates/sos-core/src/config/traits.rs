//! Core configuration trait

use crate::SosError;
use std::path::Path;

/// A configuration assembled from defaults, a file, the environment, and
/// command-line overrides
pub trait LayeredConfig: Clone + Default + Send + Sync + 'static {
    /// Load configuration from a file
    fn load_from_file(path: &Path) -> Result<Self, SosError>;

    /// Merge with environment variables
    fn merge_with_env(&mut self) -> Result<(), SosError>;

    /// Validate the configuration
    fn validate(&self) -> Result<(), SosError>;

    /// Set a configuration value from a dotted key (for CLI parsing)
    fn set_from_string(&mut self, key: &str, value: &str) -> Result<(), SosError>;

    /// Apply a `key=value` override
    fn apply_override(&mut self, assignment: &str) -> Result<(), SosError> {
        let (key, value) = assignment.split_once('=').ok_or_else(|| {
            SosError::config(format!("override {assignment:?} is not key=value"))
        })?;
        self.set_from_string(key.trim(), value)
    }
}
