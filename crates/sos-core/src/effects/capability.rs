//! Location-access capability effect interface
//!
//! # Effect Classification
//!
//! - **Category**: Infrastructure Effect
//! - **Implementation**: `sos-effects`
//! - **Usage**: Dispatcher capability gate

use async_trait::async_trait;
use std::sync::Arc;

/// Host permission gate for fine-grained location access
#[async_trait]
pub trait CapabilityEffects: Send + Sync {
    /// Whether the capability is currently granted. Never prompts.
    async fn is_granted(&self) -> bool;

    /// Ask the host to grant the capability and wait for the decision
    async fn request(&self) -> bool;
}

/// Blanket implementation for Arc<T> where T: CapabilityEffects
#[async_trait]
impl<T: CapabilityEffects + ?Sized> CapabilityEffects for Arc<T> {
    async fn is_granted(&self) -> bool {
        (**self).is_granted().await
    }

    async fn request(&self) -> bool {
        (**self).request().await
    }
}
