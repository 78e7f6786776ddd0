//! SOS Testing Infrastructure
//!
//! Scriptable mock handlers for every effect trait in `sos-core`, each
//! recording how it was called, plus fixtures that bundle them.
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! sos-testkit = { path = "../sos-testkit" }
//! ```
//!
//! ```rust,ignore
//! use sos_testkit::*;
//!
//! let effects = MockEffectSet::granted_with_fix(12.9716, 77.5946);
//! // build the dispatcher from effects.capability, effects.location, ...
//! assert_eq!(effects.store.write_calls(), 1);
//! ```

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
