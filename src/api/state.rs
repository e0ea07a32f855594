//! Application State
//!
//! Shared state accessible by all API handlers.
//! Everything here is built at startup and only read afterwards.

use crate::bindings::BindingRegistry;
use crate::dataset::Dataset;
use crate::layout::Page;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// The joined dataset, read-only for the process lifetime
    pub dataset: Arc<Dataset>,
    /// Control → chart bindings
    pub registry: Arc<BindingRegistry>,
    /// Page composed from the dataset's ranges
    pub page: Arc<Page>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create state with the standard dashboard bindings
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self::with_registry(dataset, BindingRegistry::standard())
    }

    /// Create state with a custom binding registry
    pub fn with_registry(dataset: Arc<Dataset>, registry: BindingRegistry) -> Self {
        let page = Page::build(&dataset, &registry);
        Self {
            dataset,
            registry: Arc::new(registry),
            page: Arc::new(page),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
