//! Effect trait definitions
//!
//! Pure trait definitions for every side effect the beacon performs.
//! This module defines **what** effects can be performed; handlers in
//! `sos-effects` define **how**, and `sos-testkit` provides scriptable mocks.
//!
//! # Effect Classification
//!
//! - **Capability**: host permission gate for location access
//! - **Location**: one-shot last-known position lookup
//! - **Record store**: key generation, single-attempt writes, read-back
//! - **Notification**: transient user-visible messages
//!
//! All dispatcher code is parameterized by these traits, so the same
//! workflow runs against production handlers and deterministic mocks.

pub mod capability;
pub mod location;
pub mod notification;
pub mod record_store;

pub use capability::CapabilityEffects;
pub use location::LocationEffects;
pub use notification::{Notification, NotificationEffects, NotificationLevel};
pub use record_store::RecordStoreEffects;
