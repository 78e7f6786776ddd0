//! Beacon configuration
//!
//! Layered the usual way: defaults, then a TOML file, then `SOS_*`
//! environment variables, then `key=value` overrides from the command line.
//! `validate` runs last.

mod traits;

pub use traits::LayeredConfig;

use crate::types::{CollectionPath, Coordinates, DEFAULT_COLLECTION};
use crate::{Result, SosError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Prefix of environment overrides
pub const ENV_PREFIX: &str = "SOS_";

/// Default request timeout for the remote store
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SosConfig {
    /// Remote record store
    pub database: DatabaseConfig,
    /// Last-known location source
    pub location: LocationConfig,
    /// Location-access capability policy
    pub capability: CapabilityConfig,
}

/// Remote record store settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Base URL of the realtime database, e.g. `https://<project>.firebaseio.com`
    pub url: Option<String>,
    /// Database secret or ID token appended as `?auth=`
    pub auth_token: Option<String>,
    /// Collection records are appended to
    pub collection: String,
    /// HTTP request timeout
    pub timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            auth_token: None,
            collection: DEFAULT_COLLECTION.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

/// Where the last-known location comes from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationSource {
    /// Coordinates given in the configuration
    Fixed,
    /// A JSON file holding the most recent fix
    File,
    /// No location provider; every record carries the sentinel
    #[default]
    None,
}

impl FromStr for LocationSource {
    type Err = SosError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(Self::Fixed),
            "file" => Ok(Self::File),
            "none" => Ok(Self::None),
            other => Err(SosError::config(format!("unknown location source {other:?}"))),
        }
    }
}

/// Last-known location settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    /// Provider kind
    pub source: LocationSource,
    /// Latitude for the `fixed` source
    pub latitude: Option<f64>,
    /// Longitude for the `fixed` source
    pub longitude: Option<f64>,
    /// Fix file for the `file` source
    pub path: Option<PathBuf>,
}

impl LocationConfig {
    /// Coordinates of the `fixed` source
    pub fn fixed_coordinates(&self) -> Result<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Coordinates::new(latitude, longitude),
            _ => Err(SosError::config(
                "location.source = \"fixed\" needs location.latitude and location.longitude",
            )),
        }
    }
}

/// How the location-access capability is decided
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityPolicy {
    /// Always granted
    Granted,
    /// Always denied
    Denied,
    /// Ask on the terminal the first time it is needed
    #[default]
    Prompt,
}

impl FromStr for CapabilityPolicy {
    type Err = SosError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "granted" | "grant" | "allow" => Ok(Self::Granted),
            "denied" | "deny" => Ok(Self::Denied),
            "prompt" | "ask" => Ok(Self::Prompt),
            other => Err(SosError::config(format!("unknown capability policy {other:?}"))),
        }
    }
}

/// Capability settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapabilityConfig {
    /// Grant policy
    pub policy: CapabilityPolicy,
}

impl SosConfig {
    /// Parsed collection path
    pub fn collection(&self) -> Result<CollectionPath> {
        CollectionPath::new(&self.database.collection)
            .map_err(|e| SosError::config(format!("database.collection: {e}")))
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| SosError::serialization(format!("Failed to render config: {e}")))
    }

    /// Load `path` if it exists, otherwise start from defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply `SOS_*` overrides from an explicit variable list
    pub fn merge_env_vars<I, K, V>(&mut self, vars: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in vars {
            let Some(name) = key.as_ref().strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let config_key = match name {
                "DATABASE_URL" => "database.url",
                "AUTH_TOKEN" => "database.auth_token",
                "COLLECTION" => "database.collection",
                "TIMEOUT_MS" => "database.timeout_ms",
                "CAPABILITY" => "capability.policy",
                "LOCATION_SOURCE" => "location.source",
                "LOCATION_FILE" => "location.path",
                _ => continue,
            };
            self.set_from_string(config_key, value.as_ref())?;
        }
        Ok(())
    }
}

fn parse_f64(key: &str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse()
        .map_err(|_| SosError::config(format!("{key}: {value:?} is not a number")))
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl LayeredConfig for SosConfig {
    fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SosError::config(format!("Failed to read {}: {e}", path.display()))
        })?;
        toml::from_str(&content)
            .map_err(|e| SosError::config(format!("Invalid TOML in {}: {e}", path.display())))
    }

    fn merge_with_env(&mut self) -> Result<()> {
        self.merge_env_vars(std::env::vars())
    }

    fn validate(&self) -> Result<()> {
        if let Some(url) = &self.database.url {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(SosError::config(format!(
                    "database.url must be an http(s) URL, got {url:?}"
                )));
            }
        }
        if self.database.timeout_ms == 0 {
            return Err(SosError::config("database.timeout_ms must be positive"));
        }
        self.collection()?;

        match self.location.source {
            LocationSource::Fixed => {
                self.location.fixed_coordinates()?;
            }
            LocationSource::File if self.location.path.is_none() => {
                return Err(SosError::config(
                    "location.source = \"file\" needs location.path",
                ));
            }
            LocationSource::File | LocationSource::None => {}
        }
        Ok(())
    }

    fn set_from_string(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "database.url" => self.database.url = non_empty(value),
            "database.auth_token" => self.database.auth_token = non_empty(value),
            "database.collection" => self.database.collection = value.trim().to_string(),
            "database.timeout_ms" => {
                self.database.timeout_ms = value.trim().parse().map_err(|_| {
                    SosError::config(format!("database.timeout_ms: {value:?} is not an integer"))
                })?;
            }
            "location.source" => self.location.source = value.parse()?,
            "location.latitude" => self.location.latitude = Some(parse_f64(key, value)?),
            "location.longitude" => self.location.longitude = Some(parse_f64(key, value)?),
            "location.path" => self.location.path = non_empty(value).map(PathBuf::from),
            "capability.policy" => self.capability.policy = value.parse()?,
            other => return Err(SosError::config(format!("unknown config key {other:?}"))),
        }
        Ok(())
    }
}
