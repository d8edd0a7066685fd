use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

use crate::config::Transport;
use crate::services::brewery_api::BreweryApiClient;

/// Shared state for the HTTP routes that sit next to the MCP endpoint.
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<BreweryApiClient>,
    pub metrics: Option<Arc<PrometheusHandle>>,
    pub transport: Transport,
}

impl AppState {
    pub fn new(
        api: Arc<BreweryApiClient>,
        metrics: Option<PrometheusHandle>,
        transport: Transport,
    ) -> Self {
        Self {
            api,
            metrics: metrics.map(Arc::new),
            transport,
        }
    }
}
