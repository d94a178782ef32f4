//! GoCity Core Library
//!
//! This crate provides configuration, constants and the storage backend type
//! shared by the storage layer and the API process.

pub mod config;
pub mod constants;
pub mod storage_types;

// Re-export commonly used types
pub use config::Config;
pub use storage_types::StorageBackend;
