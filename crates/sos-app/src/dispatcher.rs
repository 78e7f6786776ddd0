//! SOS Dispatcher - Portable Business Logic
//!
//! One user action runs one attempt through
//! `Idle → AwaitingCapability → AwaitingLocation → Writing → {Succeeded | Failed}`.
//! Every step is awaited in sequence; nothing from one attempt survives into
//! the next.
//!
//! Failures are reported to the user through [`NotificationEffects`] and
//! returned as a [`DispatchOutcome`], never as `Err`. A missing location is
//! not a failure: the record is still sent with the `Unknown` sentinel so an
//! emergency signal is never held back for lack of coordinates.

use crate::messages::Notice;
use sos_core::{
    CapabilityEffects, CollectionPath, LocationEffects, LocationFix, NotificationEffects,
    RecordKey, RecordStoreEffects, SosError, SosRecord,
};
use std::fmt;

/// Phase of a single dispatch attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchPhase {
    /// Not started
    Idle,
    /// Checking or requesting location access
    AwaitingCapability,
    /// Looking up the last known location
    AwaitingLocation,
    /// Generating a key and writing the record
    Writing,
    /// The record was written
    Succeeded,
    /// The attempt ended without a write
    Failed,
}

/// How an attempt ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchStatus {
    /// The record was written under `key`
    Sent {
        /// Key the record was stored under
        key: RecordKey,
    },
    /// The capability was refused, or vanished between grant and use
    PermissionDenied,
    /// The store produced no usable key; nothing was written
    KeyGenerationFailed,
    /// The single write attempt failed
    WriteFailed {
        /// Key the write was attempted under
        key: RecordKey,
        /// Store error text
        reason: String,
    },
}

/// Result of one attempt, including the path it took
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchOutcome {
    /// How the attempt ended
    pub status: DispatchStatus,
    /// The record built for this attempt, if the attempt got that far
    pub record: Option<SosRecord>,
    /// Whether the record carries real coordinates
    pub location_available: bool,
    /// Phases visited, starting with `Idle`
    pub phases: Vec<DispatchPhase>,
}

impl DispatchOutcome {
    /// Whether the record reached the store
    pub fn is_sent(&self) -> bool {
        matches!(self.status, DispatchStatus::Sent { .. })
    }

    /// Phase the attempt ended in
    pub fn final_phase(&self) -> DispatchPhase {
        self.phases.last().copied().unwrap_or(DispatchPhase::Idle)
    }

    /// The error a non-sent attempt maps to
    pub fn error(&self) -> Option<SosError> {
        match &self.status {
            DispatchStatus::Sent { .. } => None,
            DispatchStatus::PermissionDenied => {
                Some(SosError::permission_denied(Notice::PermissionDenied.text()))
            }
            DispatchStatus::KeyGenerationFailed => {
                Some(SosError::key_generation(Notice::KeyFailed.text()))
            }
            DispatchStatus::WriteFailed { reason, .. } => Some(SosError::write_failed(reason)),
        }
    }
}

impl fmt::Display for DispatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sent { key } => write!(f, "sent as {key}"),
            Self::PermissionDenied => f.write_str("permission denied"),
            Self::KeyGenerationFailed => f.write_str("key generation failed"),
            Self::WriteFailed { key, reason } => write!(f, "write of {key} failed: {reason}"),
        }
    }
}

/// Phase trail of the attempt in progress
struct Attempt {
    phases: Vec<DispatchPhase>,
    location_available: bool,
}

impl Attempt {
    fn start() -> Self {
        Self {
            phases: vec![DispatchPhase::Idle],
            location_available: false,
        }
    }

    fn enter(&mut self, phase: DispatchPhase) {
        let from = self.phases.last().copied().unwrap_or(DispatchPhase::Idle);
        tracing::debug!(?from, to = ?phase, "Dispatch phase transition");
        self.phases.push(phase);
    }

    fn finish(mut self, status: DispatchStatus, record: Option<SosRecord>) -> DispatchOutcome {
        let terminal = if matches!(status, DispatchStatus::Sent { .. }) {
            DispatchPhase::Succeeded
        } else {
            DispatchPhase::Failed
        };
        self.enter(terminal);
        DispatchOutcome {
            status,
            record,
            location_available: self.location_available,
            phases: self.phases,
        }
    }
}

/// Sends SOS records through injected effect handlers
pub struct SosDispatcher<C, L, S, N> {
    capability: C,
    location: L,
    store: S,
    notifier: N,
    collection: CollectionPath,
}

impl<C, L, S, N> SosDispatcher<C, L, S, N>
where
    C: CapabilityEffects,
    L: LocationEffects,
    S: RecordStoreEffects,
    N: NotificationEffects,
{
    /// Dispatcher writing to the default collection
    pub fn new(capability: C, location: L, store: S, notifier: N) -> Self {
        Self {
            capability,
            location,
            store,
            notifier,
            collection: CollectionPath::default(),
        }
    }

    /// Write to `collection` instead
    pub fn with_collection(mut self, collection: CollectionPath) -> Self {
        self.collection = collection;
        self
    }

    /// Collection records are written to
    pub fn collection(&self) -> &CollectionPath {
        &self.collection
    }

    /// Entry point bound to the user's SOS action
    #[tracing::instrument(skip(self), fields(collection = %self.collection))]
    pub async fn initiate(&self) -> DispatchOutcome {
        tracing::info!("SOS dispatch initiated");
        let outcome = self.ensure_location_capability(Attempt::start()).await;
        match &outcome.status {
            DispatchStatus::Sent { key } => {
                tracing::info!(%key, location = outcome.location_available, "SOS dispatched");
            }
            status => tracing::warn!(%status, "SOS dispatch did not complete"),
        }
        outcome
    }

    async fn ensure_location_capability(&self, mut attempt: Attempt) -> DispatchOutcome {
        attempt.enter(DispatchPhase::AwaitingCapability);

        if self.capability.is_granted().await {
            return self.acquire_location_and_dispatch(attempt).await;
        }

        tracing::debug!("Location capability not granted, requesting");
        if self.capability.request().await {
            self.acquire_location_and_dispatch(attempt).await
        } else {
            self.deny(attempt).await
        }
    }

    async fn acquire_location_and_dispatch(&self, mut attempt: Attempt) -> DispatchOutcome {
        // The grant may have been withdrawn between the decision and its use
        if !self.capability.is_granted().await {
            tracing::warn!("Location capability lost before lookup");
            return self.deny(attempt).await;
        }

        attempt.enter(DispatchPhase::AwaitingLocation);
        let fix = self.acquire_location().await;
        attempt.location_available = fix.is_known();
        self.dispatch(attempt, fix).await
    }

    async fn acquire_location(&self) -> LocationFix {
        match self.location.last_known_location().await {
            Ok(Some(coordinates)) => {
                tracing::debug!(%coordinates, "Last known location acquired");
                LocationFix::Known(coordinates)
            }
            Ok(None) => {
                tracing::warn!("Location provider has no last known location");
                self.show(Notice::LocationFailed).await;
                LocationFix::Unknown
            }
            Err(e) => {
                tracing::warn!(error = %e, "Location lookup failed");
                self.show(Notice::LocationFailed).await;
                LocationFix::Unknown
            }
        }
    }

    async fn dispatch(&self, mut attempt: Attempt, fix: LocationFix) -> DispatchOutcome {
        let record = SosRecord::from_fix(&fix);
        attempt.enter(DispatchPhase::Writing);

        let key = match self.store.generate_key(&self.collection).await {
            Some(raw) => match RecordKey::new(raw) {
                Ok(key) => key,
                Err(e) => {
                    tracing::error!(error = %e, "Store produced an unusable key");
                    self.show(Notice::KeyFailed).await;
                    return attempt.finish(DispatchStatus::KeyGenerationFailed, Some(record));
                }
            },
            None => {
                tracing::error!("Store produced no key");
                self.show(Notice::KeyFailed).await;
                return attempt.finish(DispatchStatus::KeyGenerationFailed, Some(record));
            }
        };

        let record = record.with_key(key.clone());
        match self
            .store
            .write_record(&self.collection, &key, &record)
            .await
        {
            Ok(()) => {
                self.show(Notice::Sent).await;
                attempt.finish(DispatchStatus::Sent { key }, Some(record))
            }
            Err(e) => {
                tracing::error!(%key, error = %e, "SOS write failed");
                self.show(Notice::SendFailed).await;
                attempt.finish(
                    DispatchStatus::WriteFailed {
                        key,
                        reason: e.to_string(),
                    },
                    Some(record),
                )
            }
        }
    }

    async fn deny(&self, attempt: Attempt) -> DispatchOutcome {
        self.show(Notice::PermissionDenied).await;
        attempt.finish(DispatchStatus::PermissionDenied, None)
    }

    async fn show(&self, notice: Notice) {
        self.notifier.notify(notice.notification()).await;
    }
}
