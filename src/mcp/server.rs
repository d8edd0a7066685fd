//! MCP ServerHandler implementation for the brewery directory.
//!
//! Tools (each canonical name has a snake_case alias for older clients):
//! - `brewery/search` / `search_breweries`: search by name, city, state or type
//! - `brewery/by-id` / `get_brewery_by_id`: one brewery by id
//! - `brewery/random` / `get_random_brewery`: one text block per random brewery
//! - `list_brewery_types`: static type descriptions
//!
//! Resource `brewery://types` and prompt `brewery/by-state` are served by hand
//! next to the tool router.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, GetPromptRequestParams, GetPromptResult, Implementation,
    ListPromptsResult, ListResourcesResult, PaginatedRequestParams, ProtocolVersion,
    ReadResourceRequestParams, ReadResourceResult, ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, RoleServer, ServerHandler};
use tracing::{debug, warn};

use super::{prompts, resources};
use crate::models::{ByIdQuery, RandomQuery, SearchQuery};
use crate::services::brewery_api::{BreweryApiClient, BreweryApiError};
use crate::services::format::{format_breweries, format_brewery, format_brewery_types};

pub const SERVER_NAME: &str = "open-brewery-db-mcp";

/// Brewery directory MCP server. Cheap to clone; clones share one HTTP client.
#[derive(Debug, Clone)]
pub struct BreweryMcpServer {
    tool_router: ToolRouter<Self>,
    api: Arc<BreweryApiClient>,
}

impl BreweryMcpServer {
    pub fn new(api: BreweryApiClient) -> Self {
        Self::with_shared_client(Arc::new(api))
    }

    pub fn with_shared_client(api: Arc<BreweryApiClient>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            api,
        }
    }

    pub async fn search_text(&self, query: SearchQuery) -> Result<String, BreweryApiError> {
        let breweries = self.api.search_breweries(query).await?;
        Ok(format_breweries(&breweries))
    }

    pub async fn by_id_text(&self, query: ByIdQuery) -> Result<String, BreweryApiError> {
        let brewery = self.api.get_brewery_by_id(query).await?;
        Ok(format_brewery(&brewery))
    }

    /// One rendered block per brewery, in upstream order.
    pub async fn random_texts(&self, query: RandomQuery) -> Result<Vec<String>, BreweryApiError> {
        let breweries = self.api.get_random_brewery(query).await?;
        Ok(breweries.iter().map(format_brewery).collect())
    }

    pub fn types_text(&self) -> String {
        format_brewery_types(&self.api.list_brewery_types())
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for BreweryMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .enable_prompts()
                .build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                title: Some("Open Brewery DB".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                description: Some(
                    "Search and browse breweries from the public Open Brewery DB directory"
                        .to_string(),
                ),
                icons: None,
                website_url: Some("https://www.openbrewerydb.org".to_string()),
            },
            instructions: Some(
                "Brewery directory backed by Open Brewery DB.\n\
                 Use brewery/search to find breweries by name (query), city, state or type; \
                 page through results with per_page (max 50) and page.\n\
                 Use brewery/by-id for the full record of a brewery found by search, \
                 brewery/random to discover breweries, and list_brewery_types (or the \
                 brewery://types resource) for the meaning of each brewery_type."
                    .to_string(),
            ),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult::with_all_items(resources::list()))
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        debug!(uri = %request.uri, "Reading resource");
        let contents = resources::read(&request.uri).ok_or_else(|| {
            McpError::resource_not_found(format!("Unknown resource: {}", request.uri), None)
        })?;
        Ok(ReadResourceResult { contents })
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        Ok(ListPromptsResult::with_all_items(prompts::list()))
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        if request.name != prompts::BY_STATE {
            return Err(McpError::invalid_params(
                format!("Unknown prompt: {}", request.name),
                None,
            ));
        }

        let state = request
            .arguments
            .as_ref()
            .and_then(|args| args.get("state"))
            .and_then(|value| value.as_str())
            .ok_or_else(|| {
                McpError::invalid_params("Missing required string argument: state", None)
            })?;

        Ok(GetPromptResult {
            description: Some(format!("Breweries in {state}")),
            messages: prompts::by_state_messages(state),
        })
    }
}

#[tool_router(router = tool_router)]
impl BreweryMcpServer {
    #[tool(
        name = "brewery/search",
        description = "Search for breweries by name, city, state, or type"
    )]
    pub async fn search(
        &self,
        Parameters(query): Parameters<SearchQuery>,
    ) -> Result<CallToolResult, McpError> {
        Ok(text_reply(self.search_text(query).await))
    }

    #[tool(
        name = "search_breweries",
        description = "Search for breweries by name, city, state, or type"
    )]
    pub async fn search_breweries(
        &self,
        params: Parameters<SearchQuery>,
    ) -> Result<CallToolResult, McpError> {
        self.search(params).await
    }

    #[tool(
        name = "brewery/by-id",
        description = "Get detailed information about a specific brewery by ID"
    )]
    pub async fn by_id(
        &self,
        Parameters(query): Parameters<ByIdQuery>,
    ) -> Result<CallToolResult, McpError> {
        Ok(text_reply(self.by_id_text(query).await))
    }

    #[tool(
        name = "get_brewery_by_id",
        description = "Get detailed information about a specific brewery by ID"
    )]
    pub async fn get_brewery_by_id(
        &self,
        params: Parameters<ByIdQuery>,
    ) -> Result<CallToolResult, McpError> {
        self.by_id(params).await
    }

    #[tool(name = "brewery/random", description = "Get one or more random breweries.")]
    pub async fn random(
        &self,
        Parameters(query): Parameters<RandomQuery>,
    ) -> Result<CallToolResult, McpError> {
        Ok(match self.random_texts(query).await {
            Ok(blocks) => CallToolResult::success(blocks.into_iter().map(Content::text).collect()),
            Err(e) => error_reply(e),
        })
    }

    #[tool(name = "get_random_brewery", description = "Get one or more random breweries.")]
    pub async fn get_random_brewery(
        &self,
        params: Parameters<RandomQuery>,
    ) -> Result<CallToolResult, McpError> {
        self.random(params).await
    }

    #[tool(name = "list_brewery_types", description = "List all available brewery types")]
    pub async fn list_brewery_types(&self) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(self.types_text())]))
    }
}

fn text_reply(result: Result<String, BreweryApiError>) -> CallToolResult {
    match result {
        Ok(text) => CallToolResult::success(vec![Content::text(text)]),
        Err(e) => error_reply(e),
    }
}

fn error_reply(error: BreweryApiError) -> CallToolResult {
    warn!(error = %error, "Brewery tool call failed");
    CallToolResult::error(vec![Content::text(format!("Error: {error}"))])
}
