//! Send command handler

use anyhow::{Context, Result};
use sos_app::SosDispatcher;
use sos_core::SosConfig;
use sos_effects::{SosEffectSystem, StoreMode};

/// Run one dispatch attempt; a record that was not sent is an error exit
pub async fn handle_send(config: &SosConfig, dry_run: bool) -> Result<()> {
    let mode = if dry_run {
        StoreMode::Memory
    } else {
        StoreMode::Remote
    };
    let effects = SosEffectSystem::from_config(config, mode)?;
    let dispatcher = SosDispatcher::new(
        effects.capability,
        effects.location,
        effects.store,
        effects.notifier,
    )
    .with_collection(config.collection()?);

    let outcome = dispatcher.initiate().await;
    if let Some(error) = outcome.error() {
        return Err(error).context("SOS was not sent");
    }

    if let Some(record) = &outcome.record {
        println!(
            "{} ({}, {}){}",
            outcome.status,
            record.latitude,
            record.longitude,
            if dry_run { " [dry run]" } else { "" }
        );
    }
    Ok(())
}
