//! Tavily search API client.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::{Document, DocumentMetadata, SearchBackend, ensure_success, make_http_client};
use crate::domains::tools::error::HandlerFailure;

const DEFAULT_BASE_URL: &str = "https://api.tavily.com";

pub struct TavilyClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

#[derive(Deserialize)]
struct SearchHit {
    #[serde(default)]
    title: String,
    url: String,
    #[serde(default)]
    content: String,
    score: Option<f64>,
}

impl TavilyClient {
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
impl SearchBackend for TavilyClient {
    async fn search(&self, query: &str, k: usize) -> Result<Vec<Document>, HandlerFailure> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| HandlerFailure::not_configured("Tavily API key is not configured"))?;

        debug!(query, k, "Tavily search");
        let response = self
            .http
            .post(format!("{}/search", self.base_url))
            .json(&json!({
                "api_key": api_key,
                "query": query,
                "max_results": k,
                "search_depth": "basic",
            }))
            .send()
            .await?;
        let body: SearchResponse = ensure_success("Tavily", response).await?.json().await?;

        Ok(body
            .results
            .into_iter()
            .take(k)
            .map(|hit| Document {
                page_content: hit.content,
                metadata: DocumentMetadata {
                    title: hit.title,
                    source: hit.url,
                    score: hit.score,
                },
            })
            .collect())
    }
}
