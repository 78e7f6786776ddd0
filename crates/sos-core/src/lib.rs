//! SOS Core - pure foundation of the SOS beacon
//!
//! Domain types, the error taxonomy, and the effect interfaces the
//! dispatcher is written against. Nothing here touches a clock, an RNG, the
//! network, or the terminal; those live behind the effect traits.
//!
//! # Modules
//! - [`types`]: `SosRecord`, `LocationFix`, `RecordKey`, `CollectionPath`
//! - [`effects`]: capability, location, record store, notification traits
//! - [`push_id`]: chronological push-key encoding
//! - [`config`]: layered TOML/env configuration
//! - [`errors`]: `SosError` and `Result`

#![forbid(unsafe_code)]

pub mod config;
pub mod effects;
pub mod errors;
pub mod push_id;
pub mod types;

pub use config::{CapabilityPolicy, LayeredConfig, LocationSource, SosConfig};
pub use effects::{
    CapabilityEffects, LocationEffects, Notification, NotificationEffects, NotificationLevel,
    RecordStoreEffects,
};
pub use errors::{Result, SosError};
pub use types::{
    CollectionPath, Coordinates, LocationFix, RecordKey, SosRecord, StoredRecord,
    UNKNOWN_COORDINATE,
};
