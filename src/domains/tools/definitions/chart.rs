//! Chart data tool.
//!
//! Asks a chat model for Chart.js-style data and returns it as a JSON object
//! `{"type": ..., "data": {"labels": [...], "datasets": [...]}}`.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

use crate::domains::tools::clients::ChatCompletion;
use crate::domains::tools::content::ContentItem;
use crate::domains::tools::error::HandlerFailure;
use crate::domains::tools::schema::{SchemaSpec, ValidatedArguments};
use crate::domains::tools::tool::{Tool, ToolContext};

const SYSTEM_PROMPT: &str = "You produce chart data for Chart.js. Answer with one JSON object \
of the form {\"type\": \"bar\" | \"line\" | \"pie\" | \"doughnut\", \"data\": {\"labels\": [string], \
\"datasets\": [{\"label\": string, \"data\": [number]}]}} and nothing else.";

pub struct ChartTool {
    model: Arc<dyn ChatCompletion>,
    schema: SchemaSpec,
}

impl ChartTool {
    pub const NAME: &'static str = "Chart Tool";
    pub const DESCRIPTION: &'static str = "Retrieves chart data based on the given prompt";

    pub fn new(model: Arc<dyn ChatCompletion>) -> Self {
        Self {
            model,
            schema: SchemaSpec::prompt("Prompt to retrieve chart data"),
        }
    }

    /// Check the model output has the chart shape and re-serialize it compactly.
    fn normalize(raw: &str) -> Result<String, HandlerFailure> {
        let chart: Value = serde_json::from_str(raw)?;
        let has_type = chart.get("type").and_then(Value::as_str).is_some();
        let has_datasets = chart
            .get("data")
            .and_then(|d| d.get("datasets"))
            .and_then(Value::as_array)
            .is_some();
        if !has_type || !has_datasets {
            return Err(HandlerFailure::backend(
                "Chart data is missing \"type\" or \"data.datasets\"",
            ));
        }
        Ok(chart.to_string())
    }
}

#[async_trait]
impl Tool for ChartTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn describe(&self) -> &'static str {
        Self::DESCRIPTION
    }

    fn schema(&self) -> &SchemaSpec {
        &self.schema
    }

    fn activity(&self) -> &'static str {
        "retrieving chart data"
    }

    async fn invoke(
        &self,
        args: ValidatedArguments,
        _ctx: ToolContext,
    ) -> Result<Vec<ContentItem>, HandlerFailure> {
        let raw = self.model.complete_json(SYSTEM_PROMPT, args.prompt()).await?;
        debug!(raw = %raw, "Chart model output");
        let chart = Self::normalize(&raw)?;
        info!("Chart data generated");
        Ok(vec![ContentItem::text(chart)])
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tokio_util::sync::CancellationToken;

    use super::*;
    use crate::domains::tools::invoker::invoke;

    struct Canned(&'static str);

    #[async_trait]
    impl ChatCompletion for Canned {
        async fn complete_json(&self, _system: &str, _user: &str) -> Result<String, HandlerFailure> {
            Ok(self.0.to_string())
        }
    }

    #[tokio::test]
    async fn test_returns_chart_json() {
        let tool = ChartTool::new(Arc::new(Canned(
            r#"{ "type": "bar", "data": { "labels": ["a"], "datasets": [{ "label": "x", "data": [1] }] } }"#,
        )));
        let result = invoke(&tool, &json!({ "prompt": "sales" }), CancellationToken::new()).await;
        let chart: Value = serde_json::from_str(result.first_text()).unwrap();
        assert_eq!(chart["type"], "bar");
        assert_eq!(chart["data"]["datasets"][0]["data"], json!([1]));
    }

    #[tokio::test]
    async fn test_malformed_chart_is_failure() {
        let tool = ChartTool::new(Arc::new(Canned(r#"{ "labels": [] }"#)));
        let result = invoke(&tool, &json!({ "prompt": "sales" }), CancellationToken::new()).await;
        assert!(result.first_text().starts_with("Error retrieving chart data: "));
    }

    #[tokio::test]
    async fn test_non_json_is_failure() {
        let tool = ChartTool::new(Arc::new(Canned("not json")));
        let result = invoke(&tool, &json!({ "prompt": "sales" }), CancellationToken::new()).await;
        assert!(result.first_text().starts_with("Error retrieving chart data: "));
    }
}
