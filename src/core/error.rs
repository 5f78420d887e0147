//! Error types and handling for the MCP server.
//!
//! Only boot-time and transport errors ever reach `main`; per-call failures
//! are shaped into content by the invoker.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Tool registry misconfiguration (fatal at boot).
    #[error("Registry error: {0}")]
    Registry(#[from] crate::domains::tools::RegistryError),

    /// The artifact directory could not be prepared.
    #[error("Artifact error: {0}")]
    Artifact(#[from] crate::domains::artifacts::ArtifactError),

    /// Error originating from the transport layer.
    #[error("Transport error: {0}")]
    Transport(#[from] crate::core::transport::TransportError),
}
