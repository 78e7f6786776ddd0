//! Device position values
//!
//! A `LocationFix` is what one dispatch attempt knows about the device
//! position. It is threaded through the attempt by value and never stored.

use crate::{Result, SosError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel written in place of a coordinate when no fix is available
pub const UNKNOWN_COORDINATE: &str = "Unknown";

/// A validated latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinates")]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawCoordinates {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinates> for Coordinates {
    type Error = SosError;

    fn try_from(raw: RawCoordinates) -> Result<Self> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl Coordinates {
    /// Create coordinates, rejecting non-finite or out-of-range values
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(SosError::invalid(format!(
                "latitude {latitude} outside [-90, 90]"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(SosError::invalid(format!(
                "longitude {longitude} outside [-180, 180]"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in decimal degrees
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

/// Outcome of a last-known-location lookup for one attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationFix {
    /// The provider returned a position
    Known(Coordinates),
    /// No position; the record carries the sentinel
    Unknown,
}

impl LocationFix {
    /// Whether a real position is available
    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }

    /// The position, if any
    pub fn coordinates(&self) -> Option<Coordinates> {
        match self {
            Self::Known(coordinates) => Some(*coordinates),
            Self::Unknown => None,
        }
    }

    /// Record text for the latitude
    pub fn latitude_text(&self) -> String {
        match self {
            Self::Known(c) => decimal_text(c.latitude),
            Self::Unknown => UNKNOWN_COORDINATE.to_string(),
        }
    }

    /// Record text for the longitude
    pub fn longitude_text(&self) -> String {
        match self {
            Self::Known(c) => decimal_text(c.longitude),
            Self::Unknown => UNKNOWN_COORDINATE.to_string(),
        }
    }
}

/// Shortest decimal that reads back as `value`, always with a fractional
/// part (`10.0`, `-0.0`)
fn decimal_text(value: f64) -> String {
    let text = value.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}

impl From<Option<Coordinates>> for LocationFix {
    fn from(value: Option<Coordinates>) -> Self {
        value.map_or(Self::Unknown, Self::Known)
    }
}
