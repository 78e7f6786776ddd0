//! Mock effect handlers for deterministic testing
//!
//! Every mock is cheap to clone and shares its state between clones, so a
//! test can hand one clone to the code under test and inspect another.

use async_trait::async_trait;
use parking_lot::Mutex;
use sos_core::{
    CapabilityEffects, CollectionPath, Coordinates, LocationEffects, Notification,
    NotificationEffects, NotificationLevel, RecordKey, RecordStoreEffects, SosError, SosRecord,
    StoredRecord,
};
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Capability
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct CapabilityState {
    granted: bool,
    answer: bool,
    grant_sticks: bool,
    checks: usize,
    requests: usize,
}

/// Capability gate with a scripted grant decision
#[derive(Debug, Clone)]
pub struct MockCapabilityHandler {
    state: Arc<Mutex<CapabilityState>>,
}

impl MockCapabilityHandler {
    fn scripted(granted: bool, answer: bool, grant_sticks: bool) -> Self {
        Self {
            state: Arc::new(Mutex::new(CapabilityState {
                granted,
                answer,
                grant_sticks,
                checks: 0,
                requests: 0,
            })),
        }
    }

    /// Already granted; a request would also succeed
    pub fn granted() -> Self {
        Self::scripted(true, true, true)
    }

    /// Not granted; the user grants it when asked
    pub fn grantable() -> Self {
        Self::scripted(false, true, true)
    }

    /// Not granted; the user refuses when asked
    pub fn denied() -> Self {
        Self::scripted(false, false, false)
    }

    /// The request reports a grant but the host never records it, so a later
    /// check still says "not granted"
    pub fn revoked_after_grant() -> Self {
        Self::scripted(false, true, false)
    }

    /// Number of `is_granted` calls
    pub fn check_calls(&self) -> usize {
        self.state.lock().checks
    }

    /// Number of `request` calls
    pub fn request_calls(&self) -> usize {
        self.state.lock().requests
    }
}

#[async_trait]
impl CapabilityEffects for MockCapabilityHandler {
    async fn is_granted(&self) -> bool {
        let mut state = self.state.lock();
        state.checks += 1;
        state.granted
    }

    async fn request(&self) -> bool {
        let mut state = self.state.lock();
        state.requests += 1;
        if state.answer && state.grant_sticks {
            state.granted = true;
        }
        state.answer
    }
}

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// Scripted answer of the location provider
#[derive(Debug, Clone)]
pub enum LocationScript {
    /// Completes with a position
    Fix(Coordinates),
    /// Completes without a position
    NoFix,
    /// Fails
    Failure(SosError),
}

#[derive(Debug)]
struct LocationState {
    script: LocationScript,
    calls: usize,
}

/// Location provider with a scripted answer
#[derive(Debug, Clone)]
pub struct MockLocationHandler {
    state: Arc<Mutex<LocationState>>,
}

impl MockLocationHandler {
    /// Provider following `script`
    pub fn new(script: LocationScript) -> Self {
        Self {
            state: Arc::new(Mutex::new(LocationState { script, calls: 0 })),
        }
    }

    /// Provider that knows the given position
    pub fn at(latitude: f64, longitude: f64) -> Self {
        Self::new(LocationScript::Fix(
            Coordinates::new(latitude, longitude).expect("test coordinates in range"),
        ))
    }

    /// Provider with no cached position
    pub fn no_fix() -> Self {
        Self::new(LocationScript::NoFix)
    }

    /// Provider whose lookup fails
    pub fn failing(message: &str) -> Self {
        Self::new(LocationScript::Failure(SosError::location_unavailable(
            message,
        )))
    }

    /// Number of lookups
    pub fn calls(&self) -> usize {
        self.state.lock().calls
    }
}

#[async_trait]
impl LocationEffects for MockLocationHandler {
    async fn last_known_location(&self) -> Result<Option<Coordinates>, SosError> {
        let mut state = self.state.lock();
        state.calls += 1;
        match &state.script {
            LocationScript::Fix(coordinates) => Ok(Some(*coordinates)),
            LocationScript::NoFix => Ok(None),
            LocationScript::Failure(error) => Err(error.clone()),
        }
    }
}

// ---------------------------------------------------------------------------
// Record store
// ---------------------------------------------------------------------------

/// Scripted behaviour of the key facility
#[derive(Debug, Clone)]
pub enum KeyScript {
    /// Sequential keys `-Nmock0001`, `-Nmock0002`, ...
    Sequential,
    /// Always this raw answer (`None` or an empty string model a failure)
    Fixed(Option<String>),
}

/// One captured write call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteCall {
    /// Target collection
    pub collection: CollectionPath,
    /// Key the record was written under
    pub key: RecordKey,
    /// Record as passed to the store
    pub record: SosRecord,
}

#[derive(Debug)]
struct StoreState {
    keys: KeyScript,
    write_error: Option<SosError>,
    key_calls: usize,
    writes: Vec<WriteCall>,
    stored: Vec<StoredRecord>,
}

/// Record store with scripted key and write results
#[derive(Debug, Clone)]
pub struct MockRecordStore {
    state: Arc<Mutex<StoreState>>,
}

impl Default for MockRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRecordStore {
    /// Sequential keys, every write succeeds
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(StoreState {
                keys: KeyScript::Sequential,
                write_error: None,
                key_calls: 0,
                writes: Vec::new(),
                stored: Vec::new(),
            })),
        }
    }

    /// Replace the key script
    pub fn with_keys(self, keys: KeyScript) -> Self {
        self.state.lock().keys = keys;
        self
    }

    /// Key facility that yields nothing
    pub fn without_keys() -> Self {
        Self::new().with_keys(KeyScript::Fixed(None))
    }

    /// Every write fails with `error`
    pub fn failing_writes(error: SosError) -> Self {
        let store = Self::new();
        store.state.lock().write_error = Some(error);
        store
    }

    /// Seed records returned by `list_records`
    pub fn with_records(self, records: Vec<StoredRecord>) -> Self {
        self.state.lock().stored = records;
        self
    }

    /// Number of `generate_key` calls
    pub fn key_calls(&self) -> usize {
        self.state.lock().key_calls
    }

    /// Number of `write_record` calls, successful or not
    pub fn write_calls(&self) -> usize {
        self.state.lock().writes.len()
    }

    /// Every write call in order
    pub fn writes(&self) -> Vec<WriteCall> {
        self.state.lock().writes.clone()
    }

    /// The last record passed to `write_record`
    pub fn last_written(&self) -> Option<SosRecord> {
        self.state.lock().writes.last().map(|w| w.record.clone())
    }
}

#[async_trait]
impl RecordStoreEffects for MockRecordStore {
    async fn generate_key(&self, _collection: &CollectionPath) -> Option<String> {
        let mut state = self.state.lock();
        state.key_calls += 1;
        match &state.keys {
            KeyScript::Sequential => Some(format!("-Nmock{:04}", state.key_calls)),
            KeyScript::Fixed(answer) => answer.clone(),
        }
    }

    async fn write_record(
        &self,
        collection: &CollectionPath,
        key: &RecordKey,
        record: &SosRecord,
    ) -> Result<(), SosError> {
        let mut state = self.state.lock();
        state.writes.push(WriteCall {
            collection: collection.clone(),
            key: key.clone(),
            record: record.clone(),
        });
        if let Some(error) = &state.write_error {
            return Err(error.clone());
        }
        state.stored.push(StoredRecord {
            key: key.clone(),
            record: record.clone(),
        });
        Ok(())
    }

    async fn list_records(
        &self,
        _collection: &CollectionPath,
    ) -> Result<Vec<StoredRecord>, SosError> {
        let mut records = self.state.lock().stored.clone();
        records.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(records)
    }
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

/// Notification surface that captures everything shown
#[derive(Debug, Clone, Default)]
pub struct MockNotificationHandler {
    shown: Arc<Mutex<Vec<Notification>>>,
}

impl MockNotificationHandler {
    /// Surface with nothing shown yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Every notification in order
    pub fn notifications(&self) -> Vec<Notification> {
        self.shown.lock().clone()
    }

    /// Just the texts, in order
    pub fn messages(&self) -> Vec<String> {
        self.shown.lock().iter().map(|n| n.message.clone()).collect()
    }

    /// How many times `message` was shown
    pub fn count(&self, message: &str) -> usize {
        self.shown
            .lock()
            .iter()
            .filter(|n| n.message == message)
            .count()
    }

    /// Notifications of one level
    pub fn with_level(&self, level: NotificationLevel) -> Vec<String> {
        self.shown
            .lock()
            .iter()
            .filter(|n| n.level == level)
            .map(|n| n.message.clone())
            .collect()
    }
}

#[async_trait]
impl NotificationEffects for MockNotificationHandler {
    async fn notify(&self, notification: Notification) {
        self.shown.lock().push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sos_core::LocationFix;

    #[tokio::test]
    async fn test_capability_scripts() {
        let grantable = MockCapabilityHandler::grantable();
        assert!(!grantable.is_granted().await);
        assert!(grantable.request().await);
        assert!(grantable.is_granted().await);
        assert_eq!(grantable.check_calls(), 2);

        let flaky = MockCapabilityHandler::revoked_after_grant();
        assert!(flaky.request().await);
        assert!(!flaky.is_granted().await);
    }

    #[tokio::test]
    async fn test_store_records_failed_writes_too() {
        let store = MockRecordStore::failing_writes(SosError::write_failed("503"));
        let key = RecordKey::new("-Nk").unwrap();
        let record = SosRecord::from_fix(&LocationFix::Unknown);
        let result = store
            .write_record(&CollectionPath::default(), &key, &record)
            .await;

        assert!(result.is_err());
        assert_eq!(store.write_calls(), 1);
        assert!(store
            .list_records(&CollectionPath::default())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_sequential_keys() {
        let store = MockRecordStore::new();
        let collection = CollectionPath::default();
        assert_eq!(store.generate_key(&collection).await.as_deref(), Some("-Nmock0001"));
        assert_eq!(store.generate_key(&collection).await.as_deref(), Some("-Nmock0002"));
    }
}
