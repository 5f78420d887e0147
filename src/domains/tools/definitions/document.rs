//! Document retrieval tool.
//!
//! Searches the web for the prompt and returns the top documents as a JSON
//! array of `{pageContent, metadata: {title, source}}`.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domains::tools::clients::SearchBackend;
use crate::domains::tools::content::ContentItem;
use crate::domains::tools::error::HandlerFailure;
use crate::domains::tools::schema::{SchemaSpec, ValidatedArguments};
use crate::domains::tools::tool::{Tool, ToolContext};

/// Number of documents requested per search.
const TOP_K: usize = 3;

pub struct DocumentTool {
    search: Arc<dyn SearchBackend>,
    schema: SchemaSpec,
}

impl DocumentTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "Document Tool";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Retrieves documents with links based on the given prompt";

    pub const EMPTY_MESSAGE: &'static str =
        "No documents found for the given prompt. Please try with different keywords.";

    pub fn new(search: Arc<dyn SearchBackend>) -> Self {
        Self {
            search,
            schema: SchemaSpec::prompt("Prompt to retrieve documents with links"),
        }
    }
}

#[async_trait]
impl Tool for DocumentTool {
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
        "retrieving documents"
    }

    fn empty_message(&self) -> &'static str {
        Self::EMPTY_MESSAGE
    }

    async fn invoke(
        &self,
        args: ValidatedArguments,
        _ctx: ToolContext,
    ) -> Result<Vec<ContentItem>, HandlerFailure> {
        info!("Searching for documents with prompt: {}", args.prompt());
        let documents = self.search.search(args.prompt(), TOP_K).await?;
        if documents.is_empty() {
            return Ok(Vec::new());
        }

        info!("Found {} documents", documents.len());
        Ok(vec![ContentItem::text(serde_json::to_string(&documents)?)])
    }
}
