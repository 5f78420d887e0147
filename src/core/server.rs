//! MCP Server implementation and lifecycle management.
//!
//! `McpServer` owns the boot-time tool registry, the invoker and the artifact
//! store. It is cheap to clone and shared by every transport: the HTTP/SSE
//! transport calls its methods directly, the stdio transport goes through the
//! `rmcp::ServerHandler` implementation below.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, model::*, service::RequestContext,
};
use serde_json::Value;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use super::config::Config;
use super::error::Result;
use crate::domains::artifacts::{ArtifactLinker, ArtifactStore};
use crate::domains::tools::{
    Tool, ToolCallResult, ToolInvoker, ToolRegistry, ToolSummary, default_tools, discovery,
};

const INSTRUCTIONS: &str = "Multi-tool MCP server. Every tool takes a single `prompt` string \
and answers with text content: documents as JSON, chart data as JSON, a YouTube video id, \
or a URL to generated audio or images.";

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Dispatches tool calls against the immutable registry.
    invoker: ToolInvoker,

    /// Storage behind the artifact retrieval endpoint.
    artifacts: Arc<ArtifactStore>,
}

impl McpServer {
    /// Create a new MCP server with the production tool set.
    ///
    /// Fails if two tools share a name; the server must not start then.
    pub fn new(config: Config) -> Result<Self> {
        let artifacts = Arc::new(ArtifactStore::new(config.artifacts.dir.clone()));
        let linker = ArtifactLinker::new(
            artifacts.clone(),
            config.artifacts.base_url(),
            config.artifacts.route.clone(),
        );
        let tools = default_tools(&config, linker);
        Self::from_tools(config, tools, artifacts)
    }

    /// Create a server from a tool list. A duplicate name is a boot error.
    pub fn from_tools(
        config: Config,
        tools: Vec<Arc<dyn Tool>>,
        artifacts: Arc<ArtifactStore>,
    ) -> Result<Self> {
        let registry = ToolRegistry::from_tools(tools)?;
        info!(tools = ?registry.tool_names(), "Tool registry built");
        Ok(Self::with_registry(config, registry, artifacts))
    }

    /// Boot-time filesystem setup: create the artifact directory.
    pub async fn prepare(&self) -> Result<()> {
        self.artifacts.ensure_root().await?;
        Ok(())
    }

    /// Create a server around an already built registry.
    pub fn with_registry(
        config: Config,
        registry: ToolRegistry,
        artifacts: Arc<ArtifactStore>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            invoker: ToolInvoker::new(Arc::new(registry)),
            artifacts,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    pub fn registry(&self) -> &Arc<ToolRegistry> {
        self.invoker.registry()
    }

    pub fn artifacts(&self) -> &Arc<ArtifactStore> {
        &self.artifacts
    }

    /// `tools/list` payload.
    pub fn list_tools(&self) -> Value {
        discovery::tools_list_json(self.registry())
    }

    /// Name and description of every tool.
    pub fn tool_summaries(&self) -> Vec<ToolSummary> {
        discovery::list_tools(self.registry())
    }

    /// Call a tool by name. Never fails; errors come back as content.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: &Value,
        cancel: CancellationToken,
    ) -> ToolCallResult {
        self.invoker.call(name, arguments, cancel).await
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: discovery::to_mcp_tools(self.registry()),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, request, context), fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        let arguments = request
            .arguments
            .map(Value::Object)
            .unwrap_or(Value::Null);
        let result = self
            .call_tool(&request.name, &arguments, context.ct.clone())
            .await;
        Ok(result.into())
    }
}
