//! Backend clients used by the tool definitions.
//!
//! Each backend is a small async trait so tools can be exercised against
//! in-memory doubles. The concrete clients speak HTTP through `reqwest` and
//! take a configurable base URL.

mod openai;
mod tavily;
mod tts;
mod youtube;

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::HandlerFailure;

pub use openai::OpenAiClient;
pub use tavily::TavilyClient;
pub use tts::{GoogleTts, chunk_text};
pub use youtube::YouTubeClient;

/// A retrieved web document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub page_content: String,
    pub metadata: DocumentMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// Web search returning up to `k` documents.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, query: &str, k: usize) -> Result<Vec<Document>, HandlerFailure>;
}

/// Video search returning video ids, best match first.
#[async_trait]
pub trait VideoSearch: Send + Sync {
    async fn find_videos(&self, query: &str, limit: usize) -> Result<Vec<String>, HandlerFailure>;
}

/// A chat model answering with one JSON document.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn complete_json(&self, system: &str, user: &str) -> Result<String, HandlerFailure>;
}

/// Text-to-image generation returning image URLs.
#[async_trait]
pub trait ImageGeneration: Send + Sync {
    async fn generate_image(&self, prompt: &str) -> Result<Vec<String>, HandlerFailure>;
}

/// Text-to-speech returning MP3 bytes.
#[async_trait]
pub trait SpeechSynthesis: Send + Sync {
    async fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>, HandlerFailure>;
}

/// Build a reqwest client with sane defaults.
pub(crate) fn make_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(5))
        .timeout(Duration::from_secs(60))
        .user_agent(concat!("multimodal-mcp-server/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Turn a non-2xx response into a backend failure carrying the body.
pub(crate) async fn ensure_success(
    service: &str,
    response: reqwest::Response,
) -> Result<reqwest::Response, HandlerFailure> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(HandlerFailure::backend(format!(
        "{} returned HTTP {}: {}",
        service,
        status.as_u16(),
        body.trim()
    )))
}
