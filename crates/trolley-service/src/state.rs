//! Application state.

use std::sync::Arc;

use trolley_store::MemoryStore;

use crate::config::ServiceConfig;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The in-memory store holding catalog, carts, and trackings.
    pub store: Arc<MemoryStore>,

    /// Service configuration.
    pub config: ServiceConfig,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(store: Arc<MemoryStore>, config: ServiceConfig) -> Self {
        Self { store, config }
    }
}
