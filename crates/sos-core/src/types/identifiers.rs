//! Record keys and collection paths

use crate::{Result, SosError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Collection the mobile client has always written to
pub const DEFAULT_COLLECTION: &str = "SOSMessages";

/// Characters the database refuses in path segments
const FORBIDDEN_PATH_CHARS: &[char] = &['.', '#', '$', '[', ']'];

/// Unique, non-empty key of a record inside a collection
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordKey(String);

impl RecordKey {
    /// Wrap a key, rejecting empty or path-breaking values
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(SosError::key_generation("record key is empty"));
        }
        if key.contains('/') || key.contains(FORBIDDEN_PATH_CHARS) {
            return Err(SosError::key_generation(format!(
                "record key {key:?} contains a reserved character"
            )));
        }
        Ok(Self(key))
    }

    /// Key text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RecordKey {
    type Error = SosError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<RecordKey> for String {
    fn from(key: RecordKey) -> Self {
        key.0
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Slash-separated path of an append-only keyed collection
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollectionPath(String);

impl CollectionPath {
    /// Parse a collection path such as `SOSMessages` or `regions/north/sos`
    pub fn new(path: &str) -> Result<Self> {
        let trimmed = path.trim_matches('/');
        if trimmed.is_empty() {
            return Err(SosError::invalid("collection path is empty"));
        }
        for segment in trimmed.split('/') {
            if segment.is_empty() {
                return Err(SosError::invalid(format!(
                    "collection path {path:?} has an empty segment"
                )));
            }
            if segment.contains(FORBIDDEN_PATH_CHARS) {
                return Err(SosError::invalid(format!(
                    "collection segment {segment:?} contains one of . # $ [ ]"
                )));
            }
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Path text without leading or trailing slashes
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path of a record inside this collection
    pub fn child(&self, key: &RecordKey) -> String {
        format!("{}/{}", self.0, key)
    }
}

impl Default for CollectionPath {
    fn default() -> Self {
        Self(DEFAULT_COLLECTION.to_string())
    }
}

impl FromStr for CollectionPath {
    type Err = SosError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key_rejected() {
        assert!(matches!(
            RecordKey::new(""),
            Err(SosError::KeyGenerationFailed { .. })
        ));
        assert!(RecordKey::new("   ").is_err());
        assert!(RecordKey::new("a/b").is_err());
        assert_eq!(RecordKey::new("-Nabc").unwrap().as_str(), "-Nabc");
    }

    #[test]
    fn test_collection_path_normalization() {
        let path = CollectionPath::new("/regions/north/").unwrap();
        assert_eq!(path.as_str(), "regions/north");
        let key = RecordKey::new("k1").unwrap();
        assert_eq!(path.child(&key), "regions/north/k1");
        assert_eq!(CollectionPath::default().as_str(), "SOSMessages");
    }

    #[test]
    fn test_collection_path_rejects_reserved() {
        assert!(CollectionPath::new("").is_err());
        assert!(CollectionPath::new("a//b").is_err());
        assert!(CollectionPath::new("sos.messages").is_err());
        assert!(CollectionPath::new("sos[0]").is_err());
    }
}
