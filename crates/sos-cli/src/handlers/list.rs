//! List command handler

use anyhow::Result;
use sos_app::load_feed;
use sos_core::SosConfig;
use sos_effects::FirebaseRecordStore;

/// Print every record in the collection, then the summary
pub async fn handle_list(config: &SosConfig) -> Result<()> {
    let store = FirebaseRecordStore::from_config(&config.database)?;
    let collection = config.collection()?;
    let feed = load_feed(&store, &collection).await?;

    for stored in &feed.records {
        println!(
            "{}  {}  {}, {}",
            stored.key, stored.record.message, stored.record.latitude, stored.record.longitude
        );
    }

    let summary = feed.summary;
    println!(
        "{} record(s) in {collection}: {} located, {} without location",
        summary.total, summary.located, summary.unlocated
    );
    match summary.centroid {
        Some(centroid) => println!("centre: {centroid}"),
        None => println!("centre: none"),
    }
    Ok(())
}
