//! Firebase Realtime Database record store over the REST API
//!
//! - key generation: client-side push keys, as the database SDKs do
//! - write: `PUT {url}/{collection}/{key}.json`
//! - read-back: `GET {url}/{collection}.json`
//!
//! A database secret or ID token, when configured, is sent as `?auth=`.

use crate::push_id::PushKeyGenerator;
use async_trait::async_trait;
use sos_core::config::DatabaseConfig;
use sos_core::types::parse_collection;
use sos_core::{CollectionPath, RecordKey, RecordStoreEffects, SosError, SosRecord, StoredRecord};
use std::time::Duration;

/// REST client for one realtime database
#[derive(Debug)]
pub struct FirebaseRecordStore {
    client: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
    keys: PushKeyGenerator,
}

impl FirebaseRecordStore {
    /// Create a store for `base_url` with a request timeout
    pub fn new(
        base_url: impl Into<String>,
        auth_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, SosError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SosError::config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth_token,
            keys: PushKeyGenerator::new(),
        })
    }

    /// Create a store from the `[database]` section
    pub fn from_config(config: &DatabaseConfig) -> Result<Self, SosError> {
        let url = config
            .url
            .as_deref()
            .ok_or_else(|| SosError::config("database.url is not set"))?;
        Self::new(
            url,
            config.auth_token.clone(),
            Duration::from_millis(config.timeout_ms),
        )
    }

    /// REST URL of a whole collection
    pub fn collection_url(&self, collection: &CollectionPath) -> String {
        format!("{}/{}.json", self.base_url, collection)
    }

    /// REST URL of one record
    pub fn record_url(&self, collection: &CollectionPath, key: &RecordKey) -> String {
        format!("{}/{}.json", self.base_url, collection.child(key))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => request.query(&[("auth", token)]),
            None => request,
        }
    }
}

#[async_trait]
impl RecordStoreEffects for FirebaseRecordStore {
    async fn generate_key(&self, _collection: &CollectionPath) -> Option<String> {
        Some(self.keys.generate())
    }

    #[tracing::instrument(skip(self, record), fields(path = %collection.child(key)))]
    async fn write_record(
        &self,
        collection: &CollectionPath,
        key: &RecordKey,
        record: &SosRecord,
    ) -> Result<(), SosError> {
        let url = self.record_url(collection, key);
        let response = self
            .authorize(self.client.put(&url))
            .json(record)
            .send()
            .await
            .map_err(|e| SosError::network(format!("Failed to reach database: {e}")))?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!("Record written");
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(SosError::write_failed(format!(
                "database rejected write ({status}): {}",
                body.trim()
            )))
        }
    }

    #[tracing::instrument(skip(self), fields(collection = %collection))]
    async fn list_records(
        &self,
        collection: &CollectionPath,
    ) -> Result<Vec<StoredRecord>, SosError> {
        let url = self.collection_url(collection);
        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .map_err(|e| SosError::network(format!("Failed to reach database: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SosError::network(format!(
                "database refused read ({status})"
            )));
        }

        let snapshot: serde_json::Value = response.json().await.map_err(|e| {
            SosError::serialization(format!("Failed to parse collection snapshot: {e}"))
        })?;
        let (records, skipped) = parse_collection(snapshot);
        for entry in &skipped {
            tracing::warn!(key = %entry.key, "Skipping malformed record: {}", entry.reason);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(url: &str) -> FirebaseRecordStore {
        FirebaseRecordStore::new(url, None, Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn test_urls_follow_rest_layout() {
        let store = store("https://demo-rtdb.firebaseio.com/");
        let collection = CollectionPath::default();
        let key = RecordKey::new("-NxYz").unwrap();

        assert_eq!(
            store.collection_url(&collection),
            "https://demo-rtdb.firebaseio.com/SOSMessages.json"
        );
        assert_eq!(
            store.record_url(&collection, &key),
            "https://demo-rtdb.firebaseio.com/SOSMessages/-NxYz.json"
        );
    }

    #[test]
    fn test_auth_token_goes_in_query() {
        let store = FirebaseRecordStore::new(
            "https://demo-rtdb.firebaseio.com",
            Some("s3cret".to_string()),
            Duration::from_secs(1),
        )
        .unwrap();
        let request = store
            .authorize(store.client.get("https://demo-rtdb.firebaseio.com/a.json"))
            .build()
            .unwrap();
        assert_eq!(request.url().query(), Some("auth=s3cret"));
    }

    #[test]
    fn test_from_config_requires_url() {
        let config = DatabaseConfig::default();
        assert!(matches!(
            FirebaseRecordStore::from_config(&config),
            Err(SosError::Config { .. })
        ));
    }

    #[tokio::test]
    async fn test_unreachable_database_is_a_network_error() {
        // Port 9 (discard) on localhost is expected to refuse connections
        let store = store("http://127.0.0.1:9");
        let key = RecordKey::new("-Nk").unwrap();
        let record = SosRecord::from_fix(&sos_core::LocationFix::Unknown);
        let result = store
            .write_record(&CollectionPath::default(), &key, &record)
            .await;
        assert!(matches!(result, Err(SosError::Network { .. })));
    }
}
