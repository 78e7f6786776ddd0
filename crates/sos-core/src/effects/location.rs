//! Location effect interface
//!
//! # Effect Classification
//!
//! - **Category**: Infrastructure Effect
//! - **Implementation**: `sos-effects`
//! - **Usage**: Dispatcher location lookup

use crate::types::Coordinates;
use crate::SosError;
use async_trait::async_trait;
use std::sync::Arc;

/// Provider of the cached device position
#[async_trait]
pub trait LocationEffects: Send + Sync {
    /// One-shot last-known location lookup.
    ///
    /// `Ok(None)` means the provider completed but has no position. There is
    /// no timeout at this layer; the provider decides when it is done.
    async fn last_known_location(&self) -> Result<Option<Coordinates>, SosError>;
}

/// Blanket implementation for Arc<T> where T: LocationEffects
#[async_trait]
impl<T: LocationEffects + ?Sized> LocationEffects for Arc<T> {
    async fn last_known_location(&self) -> Result<Option<Coordinates>, SosError> {
        (**self).last_known_location().await
    }
}
