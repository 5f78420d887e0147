//! Transport layer for the MCP server.
//!
//! - **HTTP** (default): SSE session streams with JSON-RPC over POST - feature: `http`
//! - **STDIO**: standard input/output through `rmcp` - feature: `stdio`
//!
//! Both transports delegate to the same `McpServer`, so tool discovery and
//! dispatch behave identically on either.

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "http")]
pub mod rpc;

#[cfg(feature = "http")]
pub mod session;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::{DEFAULT_PORT, TransportConfig};
pub use error::{SessionError, TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "http")]
pub use config::HttpConfig;
