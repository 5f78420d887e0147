//! YouTube Data API v3 search client.

use async_trait::async_trait;
use serde::Deserialize;

use super::{VideoSearch, ensure_success, make_http_client};
use crate::domains::tools::error::HandlerFailure;

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

pub struct YouTubeClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Deserialize)]
struct SearchItem {
    id: ItemId,
}

#[derive(Deserialize)]
struct ItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

impl YouTubeClient {
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
}

#[async_trait]
impl VideoSearch for YouTubeClient {
    async fn find_videos(&self, query: &str, limit: usize) -> Result<Vec<String>, HandlerFailure> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| HandlerFailure::not_configured("YouTube API key is not configured"))?;

        let limit = limit.to_string();
        let response = self
            .http
            .get(format!("{}/search", self.base_url))
            .query(&[
                ("part", "snippet"),
                ("type", "video"),
                ("maxResults", limit.as_str()),
                ("q", query),
                ("key", api_key),
            ])
            .send()
            .await?;
        let body: SearchResponse = ensure_success("YouTube", response).await?.json().await?;

        Ok(body
            .items
            .into_iter()
            .filter_map(|item| item.id.video_id)
            .collect())
    }
}
