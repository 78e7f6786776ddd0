//! Common fixtures

use crate::mocks::{
    MockCapabilityHandler, MockLocationHandler, MockNotificationHandler, MockRecordStore,
};
use sos_core::{LocationFix, RecordKey, SosRecord, StoredRecord};

/// One mock per effect trait, sharing state with the caller
#[derive(Debug, Clone)]
pub struct MockEffectSet {
    /// Location-access capability
    pub capability: MockCapabilityHandler,
    /// Last-known location provider
    pub location: MockLocationHandler,
    /// Record store
    pub store: MockRecordStore,
    /// Notification surface
    pub notifier: MockNotificationHandler,
}

impl MockEffectSet {
    /// Assemble a set from individual mocks
    pub fn new(
        capability: MockCapabilityHandler,
        location: MockLocationHandler,
        store: MockRecordStore,
    ) -> Self {
        Self {
            capability,
            location,
            store,
            notifier: MockNotificationHandler::new(),
        }
    }

    /// Capability granted, position known, store healthy
    pub fn granted_with_fix(latitude: f64, longitude: f64) -> Self {
        Self::new(
            MockCapabilityHandler::granted(),
            MockLocationHandler::at(latitude, longitude),
            MockRecordStore::new(),
        )
    }

    /// Replace the capability mock
    pub fn with_capability(mut self, capability: MockCapabilityHandler) -> Self {
        self.capability = capability;
        self
    }

    /// Replace the location mock
    pub fn with_location(mut self, location: MockLocationHandler) -> Self {
        self.location = location;
        self
    }

    /// Replace the store mock
    pub fn with_store(mut self, store: MockRecordStore) -> Self {
        self.store = store;
        self
    }
}

/// A stored record with the given key and coordinate texts
pub fn stored_record(key: &str, latitude: &str, longitude: &str) -> StoredRecord {
    let key = RecordKey::new(key).unwrap();
    let mut record = SosRecord::from_fix(&LocationFix::Unknown).with_key(key.clone());
    record.latitude = latitude.to_string();
    record.longitude = longitude.to_string();
    StoredRecord { key, record }
}

/// Install a test-writer tracing subscriber once per process
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}
