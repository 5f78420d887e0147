//! OpenAI client for chat completions (JSON mode) and image generation.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::{ChatCompletion, ImageGeneration, ensure_success, make_http_client};
use crate::domains::tools::error::HandlerFailure;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const CHAT_MODEL: &str = "gpt-4o-mini";
const IMAGE_MODEL: &str = "dall-e-3";
const IMAGE_SIZE: &str = "1024x1024";

pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ImageResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Deserialize)]
struct ImageData {
    url: Option<String>,
}

impl OpenAiClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            http: make_http_client(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn api_key(&self) -> Result<&str, HandlerFailure> {
        self.api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| HandlerFailure::not_configured("OpenAI API key is not configured"))
    }
}

#[async_trait]
impl ChatCompletion for OpenAiClient {
    async fn complete_json(&self, system: &str, user: &str) -> Result<String, HandlerFailure> {
        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(self.api_key()?)
            .json(&json!({
                "model": CHAT_MODEL,
                "response_format": { "type": "json_object" },
                "messages": [
                    { "role": "system", "content": system },
                    { "role": "user", "content": user },
                ],
            }))
            .send()
            .await?;
        let body: ChatResponse = ensure_success("OpenAI", response).await?.json().await?;

        body.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| HandlerFailure::backend("OpenAI returned no completion"))
    }
}

#[async_trait]
impl ImageGeneration for OpenAiClient {
    async fn generate_image(&self, prompt: &str) -> Result<Vec<String>, HandlerFailure> {
        let response = self
            .http
            .post(format!("{}/images/generations", self.base_url))
            .bearer_auth(self.api_key()?)
            .json(&json!({
                "model": IMAGE_MODEL,
                "prompt": prompt,
                "n": 1,
                "size": IMAGE_SIZE,
            }))
            .send()
            .await?;
        let body: ImageResponse = ensure_success("OpenAI", response).await?.json().await?;

        Ok(body.data.into_iter().filter_map(|d| d.url).collect())
    }
}
