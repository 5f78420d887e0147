//! Discovery - projections of the registry for `tools/list` and info pages.
//!
//! Pure reads over the immutable registry; no handler is ever invoked.

use std::sync::Arc;

use rmcp::model::Tool as McpTool;
use serde::Serialize;
use serde_json::{Value, json};

use super::registry::ToolRegistry;

/// Name and description of a tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolSummary {
    pub name: &'static str,
    pub description: &'static str,
}

/// Summaries in registration order.
pub fn list_tools(registry: &ToolRegistry) -> Vec<ToolSummary> {
    registry
        .list()
        .iter()
        .map(|t| ToolSummary {
            name: t.name(),
            description: t.describe(),
        })
        .collect()
}

/// `tools/list` result payload, including input schemas.
pub fn tools_list_json(registry: &ToolRegistry) -> Value {
    let tools: Vec<Value> = registry
        .list()
        .iter()
        .map(|t| {
            json!({
                "name": t.name(),
                "description": t.describe(),
                "inputSchema": Value::Object(t.schema().to_json_schema()),
            })
        })
        .collect();
    json!({ "tools": tools })
}

/// rmcp tool models for the stdio transport.
pub fn to_mcp_tools(registry: &ToolRegistry) -> Vec<McpTool> {
    registry
        .list()
        .iter()
        .map(|t| McpTool {
            name: t.name().into(),
            description: Some(t.describe().into()),
            input_schema: Arc::new(t.schema().to_json_schema()),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        })
        .collect()
}
