//! HTTP surface for the streamable-HTTP transport: the MCP endpoint plus
//! health and metrics routes.

pub mod health;
pub mod metrics;

use axum::routing::get;
use axum::Router;
use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
use rmcp::transport::streamable_http_server::{StreamableHttpServerConfig, StreamableHttpService};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::mcp::BreweryMcpServer;

pub const MCP_PATH: &str = "/mcp";

/// Build the HTTP router. Every MCP session gets a clone of `server`.
pub fn router(state: AppState, server: BreweryMcpServer) -> Router {
    let mcp_service = StreamableHttpService::new(
        move || Ok(server.clone()),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig::default(),
    );

    Router::new()
        .route("/health", get(health::health_check))
        .route("/metrics", get(metrics::prometheus_metrics))
        .with_state(state)
        .nest_service(MCP_PATH, mcp_service)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
