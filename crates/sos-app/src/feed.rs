//! SOS Feed - read-back of dispatched records
//!
//! Loads a collection and summarizes it the way a monitoring dashboard
//! needs it: how many records, how many can be placed on a map, and where
//! to centre that map.

use sos_core::{CollectionPath, Coordinates, RecordStoreEffects, SosError, StoredRecord};

/// Aggregate view of a collection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedSummary {
    /// All records
    pub total: usize,
    /// Records with usable coordinates
    pub located: usize,
    /// Records with the sentinel or unparseable coordinates
    pub unlocated: usize,
    /// Mean position of located records
    pub centroid: Option<Coordinates>,
}

/// A loaded collection with its summary
#[derive(Debug, Clone)]
pub struct SosFeed {
    /// Records in key order
    pub records: Vec<StoredRecord>,
    /// Aggregate over `records`
    pub summary: FeedSummary,
}

/// Summarize `records`
pub fn summarize_feed(records: &[StoredRecord]) -> FeedSummary {
    let positions: Vec<(f64, f64)> = records
        .iter()
        .filter_map(|stored| stored.record.parsed_coordinates())
        .collect();

    let centroid = if positions.is_empty() {
        None
    } else {
        let n = positions.len() as f64;
        let (lat_sum, lon_sum) = positions
            .iter()
            .fold((0.0, 0.0), |(a, b), (lat, lon)| (a + lat, b + lon));
        Coordinates::new(lat_sum / n, lon_sum / n).ok()
    };

    FeedSummary {
        total: records.len(),
        located: positions.len(),
        unlocated: records.len() - positions.len(),
        centroid,
    }
}

/// Load every record in `collection` and summarize it
#[tracing::instrument(skip(store), fields(collection = %collection))]
pub async fn load_feed<S>(store: &S, collection: &CollectionPath) -> Result<SosFeed, SosError>
where
    S: RecordStoreEffects + ?Sized,
{
    let records = store.list_records(collection).await?;
    let summary = summarize_feed(&records);
    tracing::info!(
        total = summary.total,
        located = summary.located,
        "SOS feed loaded"
    );
    Ok(SosFeed { records, summary })
}
