//! Audio generation tool.
//!
//! Synthesizes the prompt to MP3, stores it as an artifact and returns the
//! public URL of the file.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domains::artifacts::ArtifactLinker;
use crate::domains::tools::clients::SpeechSynthesis;
use crate::domains::tools::content::ContentItem;
use crate::domains::tools::error::HandlerFailure;
use crate::domains::tools::schema::{SchemaSpec, ValidatedArguments};
use crate::domains::tools::tool::{Tool, ToolContext};

const LANGUAGE: &str = "en";
const EXTENSION: &str = "mp3";

pub struct AudioTool {
    tts: Arc<dyn SpeechSynthesis>,
    linker: ArtifactLinker,
    schema: SchemaSpec,
}

impl AudioTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "Audio Tool";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Text content to convert into an audio file";

    pub fn new(tts: Arc<dyn SpeechSynthesis>, linker: ArtifactLinker) -> Self {
        Self {
            tts,
            linker,
            schema: SchemaSpec::prompt("Prompt to generate audio"),
        }
    }
}

#[async_trait]
impl Tool for AudioTool {
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
        "generating audio"
    }

    async fn invoke(
        &self,
        args: ValidatedArguments,
        ctx: ToolContext,
    ) -> Result<Vec<ContentItem>, HandlerFailure> {
        let audio = self.tts.synthesize(args.prompt(), LANGUAGE).await?;
        // Nothing is written for a call whose session already went away.
        ctx.check_cancelled()?;

        let url = self.linker.publish(&audio, EXTENSION).await?;
        info!("Audio URL: {}", url);
        Ok(vec![ContentItem::text(url)])
    }
}
