//! Image generation tool. Returns the URL of a DALL-E image.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domains::tools::clients::ImageGeneration;
use crate::domains::tools::content::ContentItem;
use crate::domains::tools::error::HandlerFailure;
use crate::domains::tools::schema::{SchemaSpec, ValidatedArguments};
use crate::domains::tools::tool::{Tool, ToolContext};

pub struct ImageTool {
    images: Arc<dyn ImageGeneration>,
    schema: SchemaSpec,
}

impl ImageTool {
    pub const NAME: &'static str = "Image Tool";
    pub const DESCRIPTION: &'static str =
        "Generates an image based on the given text prompt using DALL-E.";

    pub fn new(images: Arc<dyn ImageGeneration>) -> Self {
        Self {
            images,
            schema: SchemaSpec::prompt("Prompt to generate an image"),
        }
    }
}

#[async_trait]
impl Tool for ImageTool {
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
        "generating image"
    }

    async fn invoke(
        &self,
        args: ValidatedArguments,
        _ctx: ToolContext,
    ) -> Result<Vec<ContentItem>, HandlerFailure> {
        let url = self
            .images
            .generate_image(args.prompt())
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| HandlerFailure::backend("No image was returned"))?;
        info!("Image URL: {}", url);
        Ok(vec![ContentItem::text(url)])
    }
}
