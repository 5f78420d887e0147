//! Tool Registry - central registration and lookup for all tools.
//!
//! The registry is populated once at boot and then shared read-only behind an
//! `Arc`. There is no removal: its lifetime is the process lifetime.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::core::config::Config;
use crate::domains::artifacts::ArtifactLinker;

use super::clients::{GoogleTts, OpenAiClient, TavilyClient, YouTubeClient};
use super::definitions::{AudioTool, ChartTool, DocumentTool, ImageTool, VideoTool};
use super::error::RegistryError;
use super::tool::Tool;

/// Ordered, name-unique collection of tools.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    by_name: HashMap<&'static str, usize>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tool. Names must be unique.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<(), RegistryError> {
        let name = tool.name();
        if self.by_name.contains_key(name) {
            return Err(RegistryError::duplicate(name));
        }
        debug!(tool = name, "Registering tool");
        self.by_name.insert(name, self.tools.len());
        self.tools.push(tool);
        Ok(())
    }

    /// Register every tool in order, failing on the first duplicate name.
    pub fn from_tools(
        tools: impl IntoIterator<Item = Arc<dyn Tool>>,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for tool in tools {
            registry.register(tool)?;
        }
        Ok(registry)
    }

    /// Chaining form of [`ToolRegistry::register`].
    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Result<Self, RegistryError> {
        self.register(tool)?;
        Ok(self)
    }

    /// Tools in registration order.
    pub fn list(&self) -> &[Arc<dyn Tool>] {
        &self.tools
    }

    pub fn get(&self, name: &str) -> Result<&Arc<dyn Tool>, RegistryError> {
        self.by_name
            .get(name)
            .map(|&idx| &self.tools[idx])
            .ok_or_else(|| RegistryError::unknown(name))
    }

    /// Get all tool names, in registration order.
    pub fn tool_names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// The production tool set, in registration order.
pub fn default_tools(config: &Config, linker: ArtifactLinker) -> Vec<Arc<dyn Tool>> {
    let creds = &config.credentials;
    let openai = Arc::new(OpenAiClient::new(creds.openai_api_key.clone()));

    vec![
        Arc::new(ChartTool::new(openai.clone())),
        Arc::new(DocumentTool::new(Arc::new(TavilyClient::new(
            creds.tavily_api_key.clone(),
        )))),
        Arc::new(VideoTool::new(Arc::new(YouTubeClient::new(
            creds.youtube_api_key.clone(),
        )))),
        Arc::new(AudioTool::new(Arc::new(GoogleTts::new()), linker)),
        Arc::new(ImageTool::new(openai)),
    ]
}
