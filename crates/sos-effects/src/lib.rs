//! SOS Effects - production handlers
//!
//! Implementations of the effect traits from `sos-core`:
//! - [`capability`]: policy-driven capability gate with a terminal prompt
//! - [`location`]: fixed, file-backed, and unavailable location sources
//! - [`record_store`]: Firebase Realtime Database REST store and an in-memory store
//! - [`notification`]: console toasts mirrored into tracing
//! - [`push_id`]: clock- and RNG-backed push-key generator
//! - [`system`]: all four handlers assembled from configuration
//!
//! Mock handlers for tests live in `sos-testkit`.

#![forbid(unsafe_code)]

pub mod capability;
pub mod location;
pub mod notification;
pub mod push_id;
pub mod record_store;
pub mod system;

pub use capability::ConfiguredCapabilityHandler;
pub use location::{FileLocationHandler, FixedLocationHandler, UnavailableLocationHandler};
pub use notification::ConsoleNotificationHandler;
pub use push_id::PushKeyGenerator;
pub use record_store::{FirebaseRecordStore, MemoryRecordStore};
pub use system::{SosEffectSystem, StoreMode};
