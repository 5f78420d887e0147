//! The uniform content envelope returned by every tool call.
//!
//! Success and failure share one shape: `{"content":[{"type":"text","text":...}]}`.
//! The envelope is never empty.

use rmcp::model::{CallToolResult, Content};
use serde::{Deserialize, Serialize};

/// One item of a tool response.
///
/// Binary payloads travel as URLs or opaque ids, never as inline bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentItem {
    Text { text: String },
}

impl ContentItem {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn as_text(&self) -> &str {
        match self {
            Self::Text { text } => text,
        }
    }
}

/// Response envelope of a tool call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCallResult {
    content: Vec<ContentItem>,
}

impl ToolCallResult {
    /// A result carrying exactly one text item.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentItem::text(text)],
        }
    }

    /// Build a result from items, or `None` when there are none.
    pub fn from_items(items: Vec<ContentItem>) -> Option<Self> {
        if items.is_empty() {
            None
        } else {
            Some(Self { content: items })
        }
    }

    pub fn content(&self) -> &[ContentItem] {
        &self.content
    }

    /// Text of the first item. Always present.
    pub fn first_text(&self) -> &str {
        self.content.first().map(ContentItem::as_text).unwrap_or_default()
    }

    /// Serialize into the JSON wire shape.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "content": self.content })
    }
}

impl From<ToolCallResult> for CallToolResult {
    fn from(result: ToolCallResult) -> Self {
        let content = result
            .content
            .into_iter()
            .map(|item| match item {
                ContentItem::Text { text } => Content::text(text),
            })
            .collect();
        CallToolResult::success(content)
    }
}
