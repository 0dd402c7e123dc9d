//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

use gsdocs_client::{PageClient, SearchClient, build_http_client};
use gsdocs_core::{AppConfig, Credential, Endpoints, Error};

use crate::tools::read_page::{ReadPageParams, read_handbook_impl, read_intranet_impl};
use crate::tools::runbooks::{ScopedSearchParams, ops_recipe_impl, runbook_impl};
use crate::tools::search::{SearchParams, search_impl};

/// Process-wide state shared by all tool invocations.
///
/// Everything here is immutable after startup: the credential is read once,
/// and both clients share one pooled HTTP connection. Concurrent invocations
/// only ever read this.
pub struct ServerState {
    pub config: AppConfig,
    pub credential: Credential,
    pub endpoints: Endpoints,
    pub search: SearchClient,
    pub pages: PageClient,
}

impl ServerState {
    pub fn from_config(config: AppConfig) -> Result<Self, Error> {
        let credential = config.credential();
        let endpoints = config.endpoints().map_err(|e| Error::Config(e.to_string()))?;
        let http = build_http_client(&config.user_agent, config.timeout())?;

        let search = SearchClient::new(http.clone(), credential.clone(), config.max_results);
        let intranet_host = endpoints
            .intranet()
            .host()
            .unwrap_or_default()
            .to_string();
        let pages = PageClient::new(http, credential.clone(), intranet_host, config.max_page_chars);

        Ok(Self { config, credential, endpoints, search, pages })
    }
}

/// The main MCP server handler for mcp-docs-search.
#[derive(Clone)]
pub struct DocsSearchServer {
    tool_router: ToolRouter<Self>,
    state: Arc<ServerState>,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl DocsSearchServer {
    /// Create a new server handler from loaded configuration.
    pub fn new(config: AppConfig) -> Result<Self, Error> {
        Ok(Self { tool_router: Self::tool_router(), state: Arc::new(ServerState::from_config(config)?) })
    }

    #[tool(
        description = "Search public and internal Giant Swarm documentation. Without authentication, searches only public sources; with authentication, also searches the intranet. Use start_index to paginate."
    )]
    async fn search(&self, params: Parameters<SearchParams>) -> Result<CallToolResult, McpError> {
        search_impl(&self.state, params.0).await
    }

    #[tool(
        description = "Search for DevOps runbooks in the Giant Swarm intranet. Requires authentication via INTRANET_SESSION_COOKIE."
    )]
    async fn search_runbook(&self, params: Parameters<ScopedSearchParams>) -> Result<CallToolResult, McpError> {
        runbook_impl(&self.state, params.0).await
    }

    #[tool(
        description = "Search for Ops Recipes (legacy runbooks) in the Giant Swarm intranet. Requires authentication via INTRANET_SESSION_COOKIE."
    )]
    async fn search_ops_recipe(&self, params: Parameters<ScopedSearchParams>) -> Result<CallToolResult, McpError> {
        ops_recipe_impl(&self.state, params.0).await
    }

    #[tool(
        description = "Read content from a single URL on the Giant Swarm handbook (public, no authentication required). Returns the page as Markdown."
    )]
    async fn read_handbook_url(&self, params: Parameters<ReadPageParams>) -> Result<CallToolResult, McpError> {
        read_handbook_impl(&self.state, params.0).await
    }

    #[tool(
        description = "Read content from a single URL on the Giant Swarm intranet using the authenticated session. Returns the page as Markdown."
    )]
    async fn read_intranet_url(&self, params: Parameters<ReadPageParams>) -> Result<CallToolResult, McpError> {
        read_intranet_impl(&self.state, params.0).await
    }
}

impl ServerHandler for DocsSearchServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "mcp-docs-search".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
