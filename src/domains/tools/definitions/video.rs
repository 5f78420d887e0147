//! Video lookup tool. Returns the id of the best matching YouTube video.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domains::tools::clients::VideoSearch;
use crate::domains::tools::content::ContentItem;
use crate::domains::tools::error::HandlerFailure;
use crate::domains::tools::schema::{SchemaSpec, ValidatedArguments};
use crate::domains::tools::tool::{Tool, ToolContext};

pub struct VideoTool {
    search: Arc<dyn VideoSearch>,
    schema: SchemaSpec,
}

impl VideoTool {
    pub const NAME: &'static str = "Video Tool";
    pub const DESCRIPTION: &'static str = "Retrieves a Youtube video based on the given prompt";
    pub const EMPTY_MESSAGE: &'static str =
        "No videos found for the given prompt. Please try with different keywords.";

    pub fn new(search: Arc<dyn VideoSearch>) -> Self {
        Self {
            search,
            schema: SchemaSpec::prompt("Prompt to retrieve a Youtube video"),
        }
    }
}

#[async_trait]
impl Tool for VideoTool {
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
        "retrieving video"
    }

    fn empty_message(&self) -> &'static str {
        Self::EMPTY_MESSAGE
    }

    async fn invoke(
        &self,
        args: ValidatedArguments,
        _ctx: ToolContext,
    ) -> Result<Vec<ContentItem>, HandlerFailure> {
        let ids = self.search.find_videos(args.prompt(), 1).await?;
        Ok(ids
            .into_iter()
            .next()
            .map(|id| {
                info!(video = %id, "Found video");
                vec![ContentItem::text(id)]
            })
            .unwrap_or_default())
    }
}
