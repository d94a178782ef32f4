//! Storage setup and initialization

use anyhow::{Context, Result};
use gocity_core::Config;
use gocity_storage::{create_storage, Storage};
use std::sync::Arc;

/// Select the storage backend. Failure here is fatal for the process.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!("Initializing storage abstraction...");
    let storage = create_storage(config)
        .await
        .context("No storage backend could be initialized")?;
    tracing::info!(
        backend = %storage.backend_type(),
        bucket = %config.gcs_bucket(),
        "Storage abstraction initialized successfully"
    );
    Ok(storage)
}
