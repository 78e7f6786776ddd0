//! SOS App - portable workflows
//!
//! - [`dispatcher`]: the SOS dispatch attempt, generic over effect handlers
//! - [`feed`]: read-back and summary of a record collection
//! - [`messages`]: notification texts
//!
//! Frontends construct handlers (production ones from `sos-effects`, mocks
//! from `sos-testkit`) and inject them here.

#![forbid(unsafe_code)]

pub mod dispatcher;
pub mod feed;
pub mod messages;

pub use dispatcher::{DispatchOutcome, DispatchPhase, DispatchStatus, SosDispatcher};
pub use feed::{load_feed, summarize_feed, FeedSummary, SosFeed};
pub use messages::Notice;
