//! The `Tool` capability.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::content::ContentItem;
use super::error::HandlerFailure;
use super::schema::{SchemaSpec, ValidatedArguments};

/// Fallback text when a handler produced nothing.
pub const DEFAULT_EMPTY_MESSAGE: &str = "No results found for the given prompt.";

/// Per-call context handed to a handler.
#[derive(Debug, Clone, Default)]
pub struct ToolContext {
    /// Cancelled when the requesting session closes.
    pub cancel: CancellationToken,
}

impl ToolContext {
    pub fn new(cancel: CancellationToken) -> Self {
        Self { cancel }
    }

    /// Fail fast if the call was already cancelled.
    pub fn check_cancelled(&self) -> Result<(), HandlerFailure> {
        if self.cancel.is_cancelled() {
            Err(HandlerFailure::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// A named capability with a declared input contract and a uniform output.
///
/// Implementations only see arguments that already passed [`Tool::schema`].
/// Returning an empty item list is a soft empty; the invoker replaces it with
/// [`Tool::empty_message`].
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique, stable identifier.
    fn name(&self) -> &'static str;

    /// Human-readable description shown in discovery.
    fn describe(&self) -> &'static str;

    fn schema(&self) -> &SchemaSpec;

    /// Activity used in failure messages, as in `Error <activity>: <cause>`.
    fn activity(&self) -> &'static str;

    fn empty_message(&self) -> &'static str {
        DEFAULT_EMPTY_MESSAGE
    }

    async fn invoke(
        &self,
        args: ValidatedArguments,
        ctx: ToolContext,
    ) -> Result<Vec<ContentItem>, HandlerFailure>;
}
