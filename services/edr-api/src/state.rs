//! Application state for the EDR API.

use metrics_exporter_prometheus::PrometheusHandle;
use observations::{CollectionInfo, Dataset};
use std::sync::Arc;

use crate::config::EdrConfig;

/// Shared application state.
pub struct AppState {
    /// Read-only observation dataset.
    pub dataset: Arc<Dataset>,

    /// EDR configuration.
    pub config: EdrConfig,

    /// Base URL for building links.
    pub base_url: String,

    /// Prometheus render handle, when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(dataset: Dataset, config: EdrConfig, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            dataset: Arc::new(dataset),
            config,
            base_url: base_url.trim_end_matches('/').to_string(),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Collection description from the config.
    pub fn collection_info(&self) -> CollectionInfo {
        self.config.collection_info()
    }

    /// Whether `id` names the collection served here.
    pub fn is_collection(&self, id: &str) -> bool {
        self.config.collection.id == id
    }
}
