//! Application state for the HTTP server.

use std::sync::Arc;

use crate::data::DatasetSource;
use crate::services::dashboard::DashboardOptions;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Where the CSV texts are loaded from on every request
    pub source: Arc<dyn DatasetSource>,
    /// Pipeline options used when a query leaves a parameter out
    pub defaults: DashboardOptions,
}

impl AppState {
    /// Create a state with the built-in pipeline defaults.
    pub fn new(source: Arc<dyn DatasetSource>) -> Self {
        Self {
            source,
            defaults: DashboardOptions::default(),
        }
    }

    pub fn with_defaults(mut self, defaults: DashboardOptions) -> Self {
        self.defaults = defaults;
        self
    }
}
