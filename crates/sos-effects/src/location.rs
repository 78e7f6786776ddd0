//! Location effect handlers
//!
//! A headless device has no sensor SDK to ask, so the last-known position
//! comes either from configuration or from a fix file that some other
//! process (a GPS daemon, a phone bridge) keeps up to date.

use async_trait::async_trait;
use sos_core::{Coordinates, LocationEffects, SosError};
use std::path::PathBuf;

/// Always reports the configured position
#[derive(Debug, Clone, Copy)]
pub struct FixedLocationHandler {
    coordinates: Coordinates,
}

impl FixedLocationHandler {
    /// Always report `coordinates`
    pub fn new(coordinates: Coordinates) -> Self {
        Self { coordinates }
    }
}

#[async_trait]
impl LocationEffects for FixedLocationHandler {
    async fn last_known_location(&self) -> Result<Option<Coordinates>, SosError> {
        Ok(Some(self.coordinates))
    }
}

/// Reads the most recent fix from a JSON file.
///
/// The file holds `{"latitude": <deg>, "longitude": <deg>}`; other fields
/// are ignored. A missing file means there is no fix yet.
#[derive(Debug, Clone)]
pub struct FileLocationHandler {
    path: PathBuf,
}

impl FileLocationHandler {
    /// Read fixes from `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl LocationEffects for FileLocationHandler {
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    async fn last_known_location(&self) -> Result<Option<Coordinates>, SosError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No fix file yet");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        if contents.trim().is_empty() {
            return Ok(None);
        }
        let coordinates: Coordinates = serde_json::from_str(&contents).map_err(|e| {
            SosError::location_unavailable(format!(
                "Unreadable fix in {}: {e}",
                self.path.display()
            ))
        })?;
        Ok(Some(coordinates))
    }
}

/// Provider for devices without any location source
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableLocationHandler;

#[async_trait]
impl LocationEffects for UnavailableLocationHandler {
    async fn last_known_location(&self) -> Result<Option<Coordinates>, SosError> {
        Ok(None)
    }
}
