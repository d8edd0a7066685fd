use std::sync::Arc;

use anyhow::Context;
use brewery_mcp::app_state::AppState;
use brewery_mcp::config::{AppConfig, Transport};
use brewery_mcp::mcp::BreweryMcpServer;
use brewery_mcp::routes;
use brewery_mcp::services::brewery_api::BreweryApiClient;
use metrics_exporter_prometheus::PrometheusBuilder;
use rmcp::ServiceExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("Failed to load configuration from environment")?;

    init_tracing(config.log_json);

    tracing::info!(
        transport = %config.transport,
        upstream = %config.api_base_url,
        "Starting open-brewery-db-mcp"
    );

    let api = Arc::new(
        BreweryApiClient::from_config(&config).context("Failed to initialize brewery API client")?,
    );
    let server = BreweryMcpServer::with_shared_client(api.clone());

    match config.transport {
        Transport::Stdio => serve_stdio(server).await,
        Transport::Http => serve_http(&config, api, server).await,
    }
}

/// Logs always go to stderr; stdout belongs to the stdio transport.
fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn serve_stdio(server: BreweryMcpServer) -> anyhow::Result<()> {
    let service = server
        .serve(rmcp::transport::io::stdio())
        .await
        .context("Failed to start MCP session on stdio")?;

    tracing::info!("Open Brewery DB MCP server running on stdio");

    // Dropping the running service on interrupt cancels the session.
    tokio::select! {
        result = service.waiting() => {
            let reason = result.context("MCP session ended with an error")?;
            tracing::info!(?reason, "MCP session closed");
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupt received, closing MCP session");
        }
    }

    Ok(())
}

async fn serve_http(
    config: &AppConfig,
    api: Arc<BreweryApiClient>,
    server: BreweryMcpServer,
) -> anyhow::Result<()> {
    let prometheus = PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus metrics recorder")?;

    metrics::describe_counter!(
        "brewery_api_requests_total",
        "Requests sent to the Open Brewery DB API"
    );
    metrics::describe_counter!(
        "brewery_api_failures_total",
        "Open Brewery DB requests that failed, by error kind"
    );
    metrics::describe_histogram!(
        "brewery_api_request_seconds",
        "Latency of Open Brewery DB requests"
    );

    let state = AppState::new(api, Some(prometheus), config.transport);
    let app = routes::router(state, server);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    tracing::info!(
        "Open Brewery DB MCP server listening on http://{}{}",
        config.bind_addr,
        routes::MCP_PATH
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Interrupt received, shutting down");
        })
        .await
        .context("HTTP server error")?;

    Ok(())
}
