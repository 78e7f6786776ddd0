//! Production effect system assembled from configuration

use crate::capability::ConfiguredCapabilityHandler;
use crate::location::{FileLocationHandler, FixedLocationHandler, UnavailableLocationHandler};
use crate::notification::ConsoleNotificationHandler;
use crate::record_store::{FirebaseRecordStore, MemoryRecordStore};
use sos_core::config::LocationConfig;
use sos_core::{
    CapabilityEffects, LocationEffects, LocationSource, NotificationEffects, RecordStoreEffects,
    SosConfig, SosError,
};
use std::sync::Arc;

/// Which record store backs the system
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StoreMode {
    /// The configured realtime database
    #[default]
    Remote,
    /// A process-local store; nothing leaves the machine
    Memory,
}

/// The four handlers a dispatcher needs, behind shared trait objects
#[derive(Clone)]
pub struct SosEffectSystem {
    /// Location-access capability
    pub capability: Arc<dyn CapabilityEffects>,
    /// Last-known location provider
    pub location: Arc<dyn LocationEffects>,
    /// Record store, remote or in-memory
    pub store: Arc<dyn RecordStoreEffects>,
    /// Console notifications
    pub notifier: Arc<dyn NotificationEffects>,
}

impl SosEffectSystem {
    /// Build production handlers from a validated configuration
    pub fn from_config(config: &SosConfig, mode: StoreMode) -> Result<Self, SosError> {
        let store: Arc<dyn RecordStoreEffects> = match mode {
            StoreMode::Remote => Arc::new(FirebaseRecordStore::from_config(&config.database)?),
            StoreMode::Memory => Arc::new(MemoryRecordStore::new()),
        };
        tracing::debug!(?mode, source = ?config.location.source, "Assembling effect system");

        Ok(Self {
            capability: Arc::new(ConfiguredCapabilityHandler::from_config(&config.capability)),
            location: location_handler(&config.location)?,
            store,
            notifier: Arc::new(ConsoleNotificationHandler::new()),
        })
    }
}

/// Location handler for the configured source
pub fn location_handler(config: &LocationConfig) -> Result<Arc<dyn LocationEffects>, SosError> {
    Ok(match config.source {
        LocationSource::Fixed => Arc::new(FixedLocationHandler::new(config.fixed_coordinates()?)),
        LocationSource::File => {
            let path = config
                .path
                .clone()
                .ok_or_else(|| SosError::config("location.path is not set"))?;
            Arc::new(FileLocationHandler::new(path))
        }
        LocationSource::None => Arc::new(UnavailableLocationHandler),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sos_core::{CapabilityPolicy, CollectionPath};

    #[tokio::test]
    async fn test_memory_mode_needs_no_database() {
        let mut config = SosConfig::default();
        config.capability.policy = CapabilityPolicy::Granted;
        config.location.source = LocationSource::Fixed;
        config.location.latitude = Some(1.0);
        config.location.longitude = Some(2.0);

        let system = SosEffectSystem::from_config(&config, StoreMode::Memory).unwrap();
        assert!(system.capability.is_granted().await);
        let fix = system.location.last_known_location().await.unwrap().unwrap();
        assert_eq!(fix.longitude(), 2.0);
        assert!(system
            .store
            .list_records(&CollectionPath::default())
            .await
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_remote_mode_needs_url() {
        let result = SosEffectSystem::from_config(&SosConfig::default(), StoreMode::Remote);
        assert!(matches!(result, Err(SosError::Config { .. })));
    }
}
