#[cfg(feature = "storage-gcs")]
use crate::GcsStorage;
#[cfg(feature = "storage-memory")]
use crate::MemoryStorage;
use crate::{Storage, StorageBackend, StorageResult};
use gocity_core::Config;
use std::sync::Arc;

/// Select the storage backend for this process.
///
/// Runs once at start-up. Unless `STORAGE_BACKEND=memory` is configured, the
/// durable GCS backend is tried first; if it cannot be built the in-memory
/// backend is used instead. The choice is never revisited. An error here means
/// no backend could be built and the process must not serve requests.
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    match config.storage_backend() {
        Some(StorageBackend::Memory) => create_memory_storage(),
        Some(StorageBackend::Gcs) | None => match create_gcs_storage(config).await {
            Ok(storage) => Ok(storage),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    bucket = %config.gcs_bucket(),
                    "Durable storage unavailable, falling back to in-memory storage"
                );
                create_memory_storage()
            }
        },
    }
}

#[cfg(feature = "storage-gcs")]
async fn create_gcs_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    let storage = GcsStorage::new(
        config.gcs_bucket().to_string(),
        config.gcs_service_account_path().map(String::from),
    )
    .await?;
    tracing::info!(bucket = %storage.bucket(), "Durable GCS storage selected");
    Ok(Arc::new(storage))
}

#[cfg(not(feature = "storage-gcs"))]
async fn create_gcs_storage(_config: &Config) -> StorageResult<Arc<dyn Storage>> {
    Err(crate::StorageError::ConfigError(
        "GCS storage backend not available (storage-gcs feature not enabled)".to_string(),
    ))
}

#[cfg(feature = "storage-memory")]
fn create_memory_storage() -> StorageResult<Arc<dyn Storage>> {
    Ok(Arc::new(MemoryStorage::new()))
}

#[cfg(not(feature = "storage-memory"))]
fn create_memory_storage() -> StorageResult<Arc<dyn Storage>> {
    Err(crate::StorageError::ConfigError(
        "Memory storage backend not available (storage-memory feature not enabled)".to_string(),
    ))
}
