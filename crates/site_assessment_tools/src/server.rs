//! MCP surface over a [`ToolRegistry`].

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    model::{
        CallToolRequestParams, CallToolResult, Content, ErrorCode, Implementation,
        ListToolsResult, PaginatedRequestParams, ProtocolVersion, ServerCapabilities, ServerInfo,
        Tool,
    },
    service::RequestContext,
};
use serde_json::Value;

use crate::ToolRegistry;

#[derive(Clone)]
pub struct SiteAssessmentServer {
    name: String,
    version: String,
    tools: Arc<ToolRegistry>,
}

impl SiteAssessmentServer {
    pub fn new(tools: Arc<ToolRegistry>) -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            tools,
        }
    }

    pub fn with_server_info(mut self, name: &str, version: &str) -> Self {
        self.name = name.to_string();
        self.version = version.to_string();
        self
    }
}

impl ServerHandler for SiteAssessmentServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.name.clone(),
                title: Some("Data Center Site Assessment".to_string()),
                version: self.version.clone(),
                description: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Assess Indian data center sites. Use list_facilities to find known facilities, \
                 resolve_coordinates to place a city or state, assess_site for solar, wind and \
                 water scores, and live_weather for current conditions."
                    .to_string(),
            ),
        }
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        std::future::ready(Ok(ListToolsResult::with_all_items(self.tools.list())))
    }

    fn get_tool(&self, name: &str) -> Option<Tool> {
        self.tools.get(name).map(|tool| tool.to_tool())
    }

    /// Tool failures are reported in-band with `isError` so callers can show
    /// the message; only unknown tools become protocol errors.
    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let tool = self.tools.get(&request.name).ok_or_else(|| {
            McpError::new(
                ErrorCode::METHOD_NOT_FOUND,
                format!("Unknown tool: {}", request.name),
                None,
            )
        })?;

        match tool.execute(request.arguments.map(Value::Object)).await {
            Ok(content) => Ok(CallToolResult::success(content)),
            Err(err) => {
                log::warn!("Tool {} failed: {:#}", request.name, err);
                Ok(CallToolResult::error(vec![Content::text(format!("{:#}", err))]))
            }
        }
    }
}
