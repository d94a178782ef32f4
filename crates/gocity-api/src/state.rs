//! Application state shared by all handlers.

use gocity_core::Config;
use gocity_storage::Storage;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Backend chosen at start-up; never replaced while the process runs.
    pub storage: Arc<dyn Storage>,
}
