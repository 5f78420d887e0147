//! Multi-tool MCP server.
//!
//! Advertises a fixed set of prompt-driven tools (documents, charts, video,
//! audio and images) and dispatches calls to them over an SSE session or
//! over stdio.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the server and its transports
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: registry, validation, invocation and the tool definitions
//!   - **artifacts**: storage and URLs for generated media
//!
//! # Example
//!
//! ```rust,no_run
//! use multimodal_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
