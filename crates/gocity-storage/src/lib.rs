//! GoCity Storage Library
//!
//! This crate provides the storage abstraction for analysis artifacts: one
//! JSON document per project. It includes the [`Storage`] trait, a durable
//! Google Cloud Storage backend and a volatile in-memory backend.
//!
//! # Object key format
//!
//! The durable backend stores a project under `{project_name}.json` in a single
//! bucket. Key generation and the project name check shared by all backends
//! live in the `keys` module.
//!
//! # Deletion
//!
//! [`GcsStorage`] does not delete objects: its `delete` succeeds without
//! contacting the bucket. Callers must not rely on `delete` to free durable
//! storage. [`MemoryStorage`] removes the entry.

pub mod factory;
#[cfg(feature = "storage-gcs")]
pub mod gcs;
pub(crate) mod keys;
#[cfg(feature = "storage-memory")]
pub mod memory;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-gcs")]
pub use gcs::GcsStorage;
pub use gocity_core::StorageBackend;
#[cfg(feature = "storage-memory")]
pub use memory::MemoryStorage;
pub use traits::{Storage, StorageError, StorageResult};
