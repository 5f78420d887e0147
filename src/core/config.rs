//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (and a `.env` file) or defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

/// Main configuration structure for the MCP server.
///
/// This struct contains all configurable aspects of the server, organized
/// by domain for clarity and maintainability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// External API credentials configuration.
    pub credentials: CredentialsConfig,

    /// Generated artifact storage and public links.
    pub artifacts: ArtifactsConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Configuration for external API credentials.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Tavily search API key (Document Tool).
    pub tavily_api_key: Option<String>,

    /// OpenAI API key (Chart Tool, Image Tool).
    pub openai_api_key: Option<String>,

    /// YouTube Data API key (Video Tool).
    pub youtube_api_key: Option<String>,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |k: &Option<String>| k.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("CredentialsConfig")
            .field("tavily_api_key", &redact(&self.tavily_api_key))
            .field("openai_api_key", &redact(&self.openai_api_key))
            .field("youtube_api_key", &redact(&self.youtube_api_key))
            .finish()
    }
}

/// Where artifacts are written and how their URLs are built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactsConfig {
    /// Directory holding artifact files.
    pub dir: PathBuf,

    /// URL path segment artifacts are served under (e.g. `mp3`).
    pub route: String,

    /// Host name placed in artifact URLs.
    pub public_host: String,

    /// Port placed in artifact URLs.
    pub public_port: u16,
}

impl ArtifactsConfig {
    /// Base URL such as `http://localhost:3001`.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.public_host, self.public_port)
    }
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("mp3"),
            route: "mp3".to_string(),
            public_host: "localhost".to_string(),
            public_port: super::transport::DEFAULT_PORT,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "mcp-sse-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            credentials: CredentialsConfig::default(),
            artifacts: ArtifactsConfig::default(),
        }
    }
}

/// Read a non-empty environment variable.
fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `PORT`, `HOST` and the `*_API_KEY` variables keep their conventional
    /// names; everything else is prefixed with `MCP_`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Some(name) = env_non_empty("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Some(level) = env_non_empty("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();
        config.artifacts.public_port = config.transport.port();

        if let Some(host) = env_non_empty("HOST") {
            config.artifacts.public_host = host;
        }
        if let Some(dir) = env_non_empty("MCP_ARTIFACT_DIR") {
            config.artifacts.dir = PathBuf::from(dir);
        }

        config.credentials.tavily_api_key = env_non_empty("TAVILY_API_KEY");
        config.credentials.openai_api_key = env_non_empty("OPENAI_API_KEY");
        config.credentials.youtube_api_key = env_non_empty("YOUTUBE_API_KEY");

        for (key, value) in [
            ("TAVILY_API_KEY", &config.credentials.tavily_api_key),
            ("OPENAI_API_KEY", &config.credentials.openai_api_key),
            ("YOUTUBE_API_KEY", &config.credentials.youtube_api_key),
        ] {
            if value.is_some() {
                info!("{} loaded from environment", key);
            } else {
                warn!("{} not set - the tools using it will report an error", key);
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_credentials_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("TAVILY_API_KEY", "tvly-12345");
        }
        let config = Config::from_env();
        assert_eq!(
            config.credentials.tavily_api_key.as_deref(),
            Some("tvly-12345")
        );
        unsafe {
            std::env::remove_var("TAVILY_API_KEY");
        }
    }

    #[test]
    fn test_artifact_url_follows_host_and_port() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("HOST", "media.example.com");
            std::env::set_var("PORT", "4100");
        }
        let config = Config::from_env();
        assert_eq!(config.artifacts.base_url(), "http://media.example.com:4100");
        unsafe {
            std::env::remove_var("HOST");
            std::env::remove_var("PORT");
        }
    }

    #[test]
    fn test_default_artifacts() {
        let config = Config::default();
        assert_eq!(config.artifacts.base_url(), "http://localhost:3001");
        assert_eq!(config.artifacts.route, "mp3");
    }

    #[test]
    fn test_credentials_redacted_in_debug() {
        let creds = CredentialsConfig {
            tavily_api_key: Some("super_secret_key".to_string()),
            ..Default::default()
        };
        let debug_str = format!("{:?}", creds);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_key"));
    }
}
