//! The SOS record and its wire form
//!
//! Records are written as JSON objects with the field names
//! `Message`, `Latitude`, `Longitude` and `key`, which is what readers of the
//! collection already expect.

use super::{LocationFix, RecordKey};
use serde::{Deserialize, Serialize};

/// Message text carried by every record
pub const SOS_MESSAGE: &str = "SOS";

/// One distress record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SosRecord {
    /// Always [`SOS_MESSAGE`] for records this system creates
    #[serde(rename = "Message")]
    pub message: String,
    /// Decimal degrees or the `Unknown` sentinel
    #[serde(rename = "Latitude")]
    pub latitude: String,
    /// Decimal degrees or the `Unknown` sentinel
    #[serde(rename = "Longitude")]
    pub longitude: String,
    /// Assigned right before the write
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<RecordKey>,
}

impl SosRecord {
    /// Build an unkeyed record from the attempt's location fix
    pub fn from_fix(fix: &LocationFix) -> Self {
        Self {
            message: SOS_MESSAGE.to_string(),
            latitude: fix.latitude_text(),
            longitude: fix.longitude_text(),
            key: None,
        }
    }

    /// Attach the store-assigned key
    pub fn with_key(mut self, key: RecordKey) -> Self {
        self.key = Some(key);
        self
    }

    /// Parse the coordinate strings back into numbers.
    ///
    /// Returns `None` for the sentinel or anything else that is not a pair of
    /// in-range decimal degrees.
    pub fn parsed_coordinates(&self) -> Option<(f64, f64)> {
        let latitude: f64 = self.latitude.trim().parse().ok()?;
        let longitude: f64 = self.longitude.trim().parse().ok()?;
        super::Coordinates::new(latitude, longitude)
            .ok()
            .map(|c| (c.latitude(), c.longitude()))
    }
}

/// A record read back from a collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    /// Key the record is stored under
    pub key: RecordKey,
    /// Record body
    pub record: SosRecord,
}

/// Why an entry of a collection snapshot was skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    /// Raw map key of the entry
    pub key: String,
    /// Parse failure
    pub reason: String,
}

/// Decode a collection snapshot (`null` or a JSON object keyed by record key).
///
/// Entries are returned in key order, which for push keys is creation order.
/// Entries that do not decode as records are reported instead of failing the
/// whole snapshot.
pub fn parse_collection(snapshot: serde_json::Value) -> (Vec<StoredRecord>, Vec<SkippedEntry>) {
    let mut records = Vec::new();
    let mut skipped = Vec::new();

    let serde_json::Value::Object(entries) = snapshot else {
        return (records, skipped);
    };

    for (raw_key, mut value) in entries {
        let key = match RecordKey::new(raw_key.clone()) {
            Ok(key) => key,
            Err(e) => {
                skipped.push(SkippedEntry {
                    key: raw_key,
                    reason: e.to_string(),
                });
                continue;
            }
        };
        // The map key is authoritative; an unusable embedded key is dropped
        if let serde_json::Value::Object(body) = &mut value {
            let embedded_ok = body
                .get("key")
                .map_or(true, |k| k.as_str().is_some_and(|k| RecordKey::new(k).is_ok()));
            if !embedded_ok {
                body.remove("key");
            }
        }
        match serde_json::from_value::<SosRecord>(value) {
            Ok(mut record) => {
                if record.key.is_none() {
                    record.key = Some(key.clone());
                }
                records.push(StoredRecord { key, record });
            }
            Err(e) => skipped.push(SkippedEntry {
                key: raw_key,
                reason: e.to_string(),
            }),
        }
    }

    records.sort_by(|a, b| a.key.cmp(&b.key));
    (records, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coordinates;
    use serde_json::json;

    #[test]
    fn test_wire_field_names() {
        let fix = LocationFix::Known(Coordinates::new(12.9716, 77.5946).unwrap());
        let record = SosRecord::from_fix(&fix).with_key(RecordKey::new("-Nk1").unwrap());

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "Message": "SOS",
                "Latitude": "12.9716",
                "Longitude": "77.5946",
                "key": "-Nk1",
            })
        );
    }

    #[test]
    fn test_unkeyed_record_omits_key() {
        let record = SosRecord::from_fix(&LocationFix::Unknown);
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("key").is_none());
        assert_eq!(record.parsed_coordinates(), None);
    }

    #[test]
    fn test_parse_collection_fills_missing_keys_and_skips_garbage() {
        let snapshot = json!({
            "-Nb": {"Message": "SOS", "Latitude": "1.5", "Longitude": "2.5"},
            "-Na": {"Message": "SOS", "Latitude": "Unknown", "Longitude": "Unknown", "key": "-Na"},
            "-Nc": {"unexpected": true},
        });

        let (records, skipped) = parse_collection(snapshot);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].key.as_str(), "-Na");
        assert_eq!(records[1].record.key.as_ref().map(RecordKey::as_str), Some("-Nb"));
        assert_eq!(records[1].record.parsed_coordinates(), Some((1.5, 2.5)));
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].key, "-Nc");
    }

    #[test]
    fn test_parse_collection_falls_back_to_map_key() {
        let snapshot = json!({
            "-Nb": {"Message": "SOS", "Latitude": "1.5", "Longitude": "2.5", "key": ""},
            "-Nd": {"Message": "SOS", "Latitude": "Unknown", "Longitude": "Unknown", "key": 7},
        });

        let (records, skipped) = parse_collection(snapshot);
        assert!(skipped.is_empty());
        let keys: Vec<_> = records
            .iter()
            .map(|r| r.record.key.as_ref().map(RecordKey::as_str))
            .collect();
        assert_eq!(keys, vec![Some("-Nb"), Some("-Nd")]);
    }

    #[test]
    fn test_parse_collection_null_is_empty() {
        let (records, skipped) = parse_collection(serde_json::Value::Null);
        assert!(records.is_empty());
        assert!(skipped.is_empty());
    }
}
