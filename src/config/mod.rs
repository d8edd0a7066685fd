use std::time::Duration;

use serde::Deserialize;
use strum::Display;

use crate::services::brewery_api::{default_user_agent, DEFAULT_BASE_URL};

/// Environment variable prefix for every setting (e.g. `BREWERY_MCP_TRANSPORT`).
pub const ENV_PREFIX: &str = "BREWERY_MCP_";

/// How the MCP server talks to its client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Transport {
    /// JSON-RPC over stdin/stdout
    #[default]
    Stdio,
    /// Streamable HTTP at `/mcp`
    Http,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Open Brewery DB collection endpoint
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default)]
    pub transport: Transport,

    /// Listen address for the HTTP transport (e.g., "127.0.0.1:3000")
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Upstream request timeout in seconds. Unset means no client-side timeout.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Emit JSON log lines instead of human-readable text
    #[serde(default)]
    pub log_json: bool,
}

fn default_api_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_bind_addr() -> String {
    "127.0.0.1:3000".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            transport: Transport::default(),
            bind_addr: default_bind_addr(),
            request_timeout_secs: None,
            user_agent: default_user_agent(),
            log_json: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::prefixed(ENV_PREFIX).from_env()
    }

    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(ENV_PREFIX).from_iter(vars)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}
