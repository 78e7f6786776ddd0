//! In-memory record store for dry runs and demos

use crate::push_id::PushKeyGenerator;
use async_trait::async_trait;
use sos_core::{CollectionPath, RecordKey, RecordStoreEffects, SosError, SosRecord, StoredRecord};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

type Collections = HashMap<CollectionPath, BTreeMap<RecordKey, SosRecord>>;

/// Append-only store kept in process memory
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    collections: Arc<RwLock<Collections>>,
    keys: Arc<PushKeyGenerator>,
}

impl MemoryRecordStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records in `collection`
    pub async fn len(&self, collection: &CollectionPath) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, BTreeMap::len)
    }
}

#[async_trait]
impl RecordStoreEffects for MemoryRecordStore {
    async fn generate_key(&self, _collection: &CollectionPath) -> Option<String> {
        Some(self.keys.generate())
    }

    async fn write_record(
        &self,
        collection: &CollectionPath,
        key: &RecordKey,
        record: &SosRecord,
    ) -> Result<(), SosError> {
        let mut collections = self.collections.write().await;
        let entries = collections.entry(collection.clone()).or_default();
        if entries.contains_key(key) {
            return Err(SosError::storage(format!(
                "{} already exists",
                collection.child(key)
            )));
        }
        entries.insert(key.clone(), record.clone());
        tracing::debug!(path = %collection.child(key), "Record stored in memory");
        Ok(())
    }

    async fn list_records(
        &self,
        collection: &CollectionPath,
    ) -> Result<Vec<StoredRecord>, SosError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|entries| {
                entries
                    .iter()
                    .map(|(key, record)| StoredRecord {
                        key: key.clone(),
                        record: record.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sos_core::LocationFix;

    #[tokio::test]
    async fn test_write_then_list_in_key_order() {
        let store = MemoryRecordStore::new();
        let collection = CollectionPath::default();

        let mut written = Vec::new();
        for _ in 0..3 {
            let key = RecordKey::new(store.generate_key(&collection).await.unwrap()).unwrap();
            let record = SosRecord::from_fix(&LocationFix::Unknown).with_key(key.clone());
            store.write_record(&collection, &key, &record).await.unwrap();
            written.push(key);
        }

        let listed: Vec<_> = store
            .list_records(&collection)
            .await
            .unwrap()
            .into_iter()
            .map(|stored| stored.key)
            .collect();
        assert_eq!(listed, written);
        assert_eq!(store.len(&collection).await, 3);
    }

    #[tokio::test]
    async fn test_existing_key_is_not_overwritten() {
        let store = MemoryRecordStore::new();
        let collection = CollectionPath::default();
        let key = RecordKey::new("-Nfixed").unwrap();
        let record = SosRecord::from_fix(&LocationFix::Unknown);

        store.write_record(&collection, &key, &record).await.unwrap();
        let again = store.write_record(&collection, &key, &record).await;
        assert!(matches!(again, Err(SosError::Storage { .. })));
    }

    #[tokio::test]
    async fn test_unknown_collection_lists_empty() {
        let store = MemoryRecordStore::new();
        let other = CollectionPath::new("elsewhere").unwrap();
        assert!(store.list_records(&other).await.unwrap().is_empty());
    }
}
