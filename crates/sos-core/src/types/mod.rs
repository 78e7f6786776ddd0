//! Domain types: positions, keys, collections, records

pub mod identifiers;
pub mod location;
pub mod record;

pub use identifiers::{CollectionPath, RecordKey, DEFAULT_COLLECTION};
pub use location::{Coordinates, LocationFix, UNKNOWN_COORDINATE};
pub use record::{parse_collection, SkippedEntry, SosRecord, StoredRecord, SOS_MESSAGE};
