//! Open Brewery DB client
//!
//! Executes the brewery directory queries against the public API and
//! validates every response before handing it back.
//!
//! Official Source: <https://www.openbrewerydb.org/documentation>

use std::time::{Duration, Instant};

use reqwest::{StatusCode, Url};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::models::{
    Brewery, BreweryType, ByIdQuery, QueryInput, RandomQuery, SearchQuery, ValidationError,
};

pub const DEFAULT_BASE_URL: &str = "https://api.openbrewerydb.org/v1/breweries";

/// Error type for brewery API operations.
#[derive(Debug, thiserror::Error)]
pub enum BreweryApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("API request failed: {}", status_line(*status, status_text))]
    Upstream { status: u16, status_text: String },

    #[error("Failed to decode brewery API response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("Invalid brewery API base URL {url:?}: {reason}")]
    BaseUrl { url: String, reason: String },
}

impl BreweryApiError {
    fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Upstream { .. } => "upstream",
            Self::Decode(_) => "decode",
            Self::Http(_) => "transport",
            Self::BaseUrl { .. } => "config",
        }
    }
}

/// Client for the Open Brewery DB breweries endpoint.
#[derive(Debug, Clone)]
pub struct BreweryApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl BreweryApiClient {
    /// Create a client against `base_url` (the `/breweries` collection endpoint).
    pub fn new(base_url: &str) -> Result<Self, BreweryApiError> {
        Self::with_options(base_url, default_user_agent(), None)
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, BreweryApiError> {
        Self::with_options(
            &config.api_base_url,
            config.user_agent.clone(),
            config.request_timeout(),
        )
    }

    fn with_options(
        base_url: &str,
        user_agent: String,
        timeout: Option<Duration>,
    ) -> Result<Self, BreweryApiError> {
        let parsed = Url::parse(base_url).map_err(|e| BreweryApiError::BaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(BreweryApiError::BaseUrl {
                url: base_url.to_string(),
                reason: "URL cannot have path segments".to_string(),
            });
        }

        let mut builder = reqwest::Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: parsed,
        })
    }

    /// Search breweries by name, city, state or type.
    ///
    /// Absent filters are not sent; an empty upstream list is a valid result.
    pub async fn search_breweries(
        &self,
        query: SearchQuery,
    ) -> Result<Vec<Brewery>, BreweryApiError> {
        let query = query.validated()?;
        let url = self.endpoint(&[]);
        let body = self.get_json("search", url, &query.to_params()).await?;
        Ok(Brewery::list_from_value(body)?)
    }

    /// Fetch one brewery by its upstream id.
    pub async fn get_brewery_by_id(&self, query: ByIdQuery) -> Result<Brewery, BreweryApiError> {
        let query = query.validated()?;
        let url = self.endpoint(&[&query.id]);
        let body = self.get_json("by_id", url, &[]).await?;
        Ok(Brewery::from_value(body)?)
    }

    /// Fetch up to `size` random breweries.
    ///
    /// The upstream decides how many records come back; only their shape is checked.
    pub async fn get_random_brewery(
        &self,
        query: RandomQuery,
    ) -> Result<Vec<Brewery>, BreweryApiError> {
        let query = query.validated()?;
        let url = self.endpoint(&["random"]);
        let body = self
            .get_json("random", url, &[("size", query.size.to_string())])
            .await?;
        Ok(Brewery::list_from_value(body)?)
    }

    /// Descriptions of every brewery type. Never touches the network.
    pub fn list_brewery_types(&self) -> Vec<String> {
        BreweryType::details()
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if !segments.is_empty() {
            // cannot_be_a_base was rejected in the constructor
            if let Ok(mut path) = url.path_segments_mut() {
                path.pop_if_empty().extend(segments);
            }
        }
        url
    }

    /// One GET, no retry. Non-2xx statuses become `Upstream`, bad JSON `Decode`.
    async fn get_json(
        &self,
        operation: &'static str,
        url: Url,
        params: &[(&'static str, String)],
    ) -> Result<Value, BreweryApiError> {
        metrics::counter!("brewery_api_requests_total", "operation" => operation).increment(1);
        let start = Instant::now();

        let result = self.send(url, params).await;

        metrics::histogram!("brewery_api_request_seconds", "operation" => operation)
            .record(start.elapsed().as_secs_f64());
        if let Err(e) = &result {
            warn!(operation, error = %e, "Brewery API request failed");
            metrics::counter!(
                "brewery_api_failures_total",
                "operation" => operation,
                "kind" => e.kind()
            )
            .increment(1);
        }
        result
    }

    async fn send(
        &self,
        url: Url,
        params: &[(&'static str, String)],
    ) -> Result<Value, BreweryApiError> {
        let mut request = self.http.get(url);
        if !params.is_empty() {
            request = request.query(params);
        }

        let response = request.send().await?;
        let status = response.status();
        debug!(url = %response.url(), status = status.as_u16(), "Brewery API responded");

        if !status.is_success() {
            // hyper keeps the server's phrase only when it differs from the canonical one
            let reason = response
                .extensions()
                .get::<hyper::ext::ReasonPhrase>()
                .map(|phrase| String::from_utf8_lossy(phrase.as_bytes()).into_owned());
            return Err(upstream_error(status, reason));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(BreweryApiError::Decode)
    }
}

fn upstream_error(status: StatusCode, reason: Option<String>) -> BreweryApiError {
    let status_text = reason
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_default();
    BreweryApiError::Upstream {
        status: status.as_u16(),
        status_text,
    }
}

fn status_line(status: u16, status_text: &str) -> String {
    if status_text.is_empty() {
        status.to_string()
    } else {
        format!("{status} {status_text}")
    }
}

pub fn default_user_agent() -> String {
    format!("open-brewery-db-mcp/{}", env!("CARGO_PKG_VERSION"))
}
