//! Tool Invoker - validates, dispatches and shapes every tool call.
//!
//! `invoke` never fails: validation errors, handler failures, soft empties and
//! cancellation all come back as a [`ToolCallResult`] with one text item.
//! There is no retry at this layer.

use std::sync::Arc;

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument, warn};

use super::content::ToolCallResult;
use super::error::HandlerFailure;
use super::registry::ToolRegistry;
use super::schema::validate;
use super::tool::{Tool, ToolContext};

/// Dispatches calls against an immutable registry.
#[derive(Clone)]
pub struct ToolInvoker {
    registry: Arc<ToolRegistry>,
}

impl ToolInvoker {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    /// Resolve `name` and invoke it. Unknown names become a content item.
    pub async fn call(&self, name: &str, raw: &Value, cancel: CancellationToken) -> ToolCallResult {
        match self.registry.get(name) {
            Ok(tool) => invoke(tool.as_ref(), raw, cancel).await,
            Err(e) => {
                warn!("{}", e);
                ToolCallResult::text(e.to_string())
            }
        }
    }
}

/// Invoke one tool with raw arguments.
#[instrument(skip_all, fields(tool = tool.name()))]
pub async fn invoke(tool: &dyn Tool, raw: &Value, cancel: CancellationToken) -> ToolCallResult {
    let args = match validate(tool.schema(), raw) {
        Ok(args) => args,
        Err(e) => {
            warn!(error = %e, "Rejected tool arguments");
            return ToolCallResult::text(e.to_string());
        }
    };

    info!("Invoking tool");
    let ctx = ToolContext::new(cancel.clone());
    let outcome = tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(HandlerFailure::Cancelled),
        res = tool.invoke(args, ctx) => res,
    };

    match outcome {
        Ok(items) => ToolCallResult::from_items(items).unwrap_or_else(|| {
            info!("Tool returned no results");
            ToolCallResult::text(tool.empty_message())
        }),
        Err(e) => {
            error!(error = %e, "Tool failed");
            ToolCallResult::text(format!("Error {}: {}", tool.activity(), e))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use serde_json::json;

    use super::*;
    use crate::domains::tools::testing::{Behavior, StubTool};
    use crate::domains::tools::tool::DEFAULT_EMPTY_MESSAGE;

    #[tokio::test]
    async fn test_invalid_prompt_skips_handler() {
        for raw in [json!({ "prompt": "" }), json!({ "prompt": "   " }), json!({})] {
            let tool = StubTool::ok("t", "d");
            let calls = tool.counter();
            let result = invoke(&tool, &raw, CancellationToken::new()).await;
            assert_eq!(result.content().len(), 1);
            assert!(result.first_text().starts_with("Invalid prompt"));
            assert_eq!(calls.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn test_handler_failure_is_prefixed() {
        let tool = StubTool::new("t", "d", Behavior::Fail("quota exceeded".into()));
        let result = invoke(&tool, &json!({ "prompt": "x" }), CancellationToken::new()).await;
        assert_eq!(result.content().len(), 1);
        assert_eq!(result.first_text(), "Error running stub: quota exceeded");
    }

    #[tokio::test]
    async fn test_soft_empty_uses_empty_message() {
        let tool = StubTool::new("t", "d", Behavior::Empty);
        let result = invoke(&tool, &json!({ "prompt": "x" }), CancellationToken::new()).await;
        assert_eq!(result.first_text(), DEFAULT_EMPTY_MESSAGE);
    }

    #[tokio::test]
    async fn test_cancellation_stops_handler() {
        let tool = StubTool::new("t", "d", Behavior::Hang);
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            trigger.cancel();
        });
        let result = invoke(&tool, &json!({ "prompt": "x" }), cancel).await;
        assert_eq!(result.first_text(), "Error running stub: operation cancelled");
    }

    #[tokio::test]
    async fn test_invoker_reports_unknown_tool() {
        let invoker = ToolInvoker::new(Arc::new(ToolRegistry::new()));
        let result = invoker
            .call("Nope", &json!({ "prompt": "x" }), CancellationToken::new())
            .await;
        assert_eq!(result.first_text(), "Unknown tool: Nope");
    }

    #[tokio::test]
    async fn test_concurrent_calls_do_not_mix() {
        let registry = ToolRegistry::new()
            .with_tool(Arc::new(StubTool::ok("alpha", "a")))
            .unwrap()
            .with_tool(Arc::new(StubTool::ok("beta", "b")))
            .unwrap();
        let invoker = ToolInvoker::new(Arc::new(registry));

        let first = json!({ "prompt": "one" });
        let second = json!({ "prompt": "two" });
        let (a, b) = tokio::join!(
            invoker.call("alpha", &first, CancellationToken::new()),
            invoker.call("beta", &second, CancellationToken::new()),
        );
        assert_eq!(a.first_text(), "alpha: one");
        assert_eq!(b.first_text(), "beta: two");
    }
}
