//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Storage operation errors
///
/// A missing project is not an error: `get` reports it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid project name: {0}")]
    InvalidKey(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// Stores one opaque payload (a serialized analysis, usually JSON) per project
/// name. A single instance is selected at start-up and shared by every request
/// handler for the lifetime of the process, so implementations must be
/// `Send + Sync` and must not require a backend-wide lock around remote I/O.
///
/// No deadline is applied here; callers that need one wrap the returned future
/// (e.g. `tokio::time::timeout`). Dropping the future cancels the operation.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Fetch the payload stored for `project_name`.
    ///
    /// Returns `Ok(None)` when nothing is stored. An empty payload that exists
    /// is returned as `Ok(Some(Bytes::new()))`. Errors are reserved for
    /// infrastructure failures and for names every backend rejects
    /// (`InvalidKey`, see `keys::validate_project_name`).
    async fn get(&self, project_name: &str) -> StorageResult<Option<Bytes>>;

    /// Replace whatever is stored for `project_name` with `content`.
    ///
    /// On `Ok(())` the write is complete per the backend's durability model.
    async fn save(&self, project_name: &str, content: Bytes) -> StorageResult<()>;

    /// Remove the payload stored for `project_name`.
    ///
    /// Deleting a missing project succeeds. The durable backend does not
    /// delete anything; see [`GcsStorage`](crate::GcsStorage).
    async fn delete(&self, project_name: &str) -> StorageResult<()>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
