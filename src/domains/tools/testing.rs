//! Test doubles shared by the tools domain tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::content::ContentItem;
use super::error::HandlerFailure;
use super::schema::{SchemaSpec, ValidatedArguments};
use super::tool::{Tool, ToolContext};

#[derive(Debug, Clone)]
pub enum Behavior {
    /// Echo `<reply>: <prompt>`.
    Reply(String),
    Empty,
    Fail(String),
    /// Wait until cancelled.
    Hang,
}

/// A tool that counts its invocations.
pub struct StubTool {
    name: &'static str,
    description: &'static str,
    schema: SchemaSpec,
    behavior: Behavior,
    calls: Arc<AtomicUsize>,
}

impl StubTool {
    pub fn new(name: &'static str, description: &'static str, behavior: Behavior) -> Self {
        Self {
            name,
            description,
            schema: SchemaSpec::prompt("Prompt for the stub"),
            behavior,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn ok(name: &'static str, description: &'static str) -> Self {
        Self::new(name, description, Behavior::Reply(name.to_string()))
    }

    /// Shared handle on the invocation counter.
    pub fn counter(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

#[async_trait]
impl Tool for StubTool {
    fn name(&self) -> &'static str {
        self.name
    }

    fn describe(&self) -> &'static str {
        self.description
    }

    fn schema(&self) -> &SchemaSpec {
        &self.schema
    }

    fn activity(&self) -> &'static str {
        "running stub"
    }

    async fn invoke(
        &self,
        args: ValidatedArguments,
        ctx: ToolContext,
    ) -> Result<Vec<ContentItem>, HandlerFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            Behavior::Reply(reply) => Ok(vec![ContentItem::text(format!(
                "{}: {}",
                reply,
                args.prompt()
            ))]),
            Behavior::Empty => Ok(Vec::new()),
            Behavior::Fail(cause) => Err(HandlerFailure::backend(cause.clone())),
            Behavior::Hang => {
                ctx.cancel.cancelled().await;
                Err(HandlerFailure::Cancelled)
            }
        }
    }
}
