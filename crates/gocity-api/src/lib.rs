//! GoCity API
//!
//! HTTP process hosting the artifact storage: selects a storage backend at
//! start-up and exposes health and project artifact routes.

pub mod error;
pub mod handlers;
pub mod setup;
pub mod state;
pub mod telemetry;
