//! Record store effect interface
//!
//! # Effect Classification
//!
//! - **Category**: Infrastructure Effect
//! - **Implementation**: `sos-effects` (Firebase REST, in-memory)
//! - **Usage**: Dispatcher writes, feed read-back
//!
//! The store is an append-only keyed collection: keys come from the store's
//! own key facility, and each write call is exactly one attempt.

use crate::types::{CollectionPath, RecordKey, SosRecord, StoredRecord};
use crate::SosError;
use async_trait::async_trait;
use std::sync::Arc;

/// Remote keyed collection of SOS records
#[async_trait]
pub trait RecordStoreEffects: Send + Sync {
    /// Produce a fresh key for `collection`.
    ///
    /// Returns the raw key text; callers must reject `None` and empty keys.
    async fn generate_key(&self, collection: &CollectionPath) -> Option<String>;

    /// Create `record` at `collection/<key>`. One attempt, no retry.
    async fn write_record(
        &self,
        collection: &CollectionPath,
        key: &RecordKey,
        record: &SosRecord,
    ) -> Result<(), SosError>;

    /// Read every record currently in `collection`, in key order
    async fn list_records(
        &self,
        collection: &CollectionPath,
    ) -> Result<Vec<StoredRecord>, SosError>;
}

/// Blanket implementation for Arc<T> where T: RecordStoreEffects
#[async_trait]
impl<T: RecordStoreEffects + ?Sized> RecordStoreEffects for Arc<T> {
    async fn generate_key(&self, collection: &CollectionPath) -> Option<String> {
        (**self).generate_key(collection).await
    }

    async fn write_record(
        &self,
        collection: &CollectionPath,
        key: &RecordKey,
        record: &SosRecord,
    ) -> Result<(), SosError> {
        (**self).write_record(collection, key, record).await
    }

    async fn list_records(
        &self,
        collection: &CollectionPath,
    ) -> Result<Vec<StoredRecord>, SosError> {
        (**self).list_records(collection).await
    }
}
