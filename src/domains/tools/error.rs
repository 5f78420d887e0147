//! Tool-specific error types.
//!
//! Three families live here, each with its own recovery rule:
//! - [`RegistryError`]: boot-time misconfiguration or lookups of unknown tools.
//! - [`ValidationError`]: malformed call arguments, rejected before any handler runs.
//! - [`HandlerFailure`]: anything that goes wrong inside a tool's backend.

use thiserror::Error;

use crate::domains::artifacts::ArtifactError;

/// Errors raised by the tool registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A tool with the same name was already registered.
    #[error("Duplicate tool name: {0}")]
    DuplicateName(String),

    /// The requested tool was not found.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

impl RegistryError {
    /// Create a new "duplicate name" error.
    pub fn duplicate(name: impl Into<String>) -> Self {
        Self::DuplicateName(name.into())
    }

    /// Create a new "unknown tool" error.
    pub fn unknown(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }
}

/// Argument validation failures.
///
/// The message always names the offending parameter, e.g.
/// `Invalid prompt: prompt cannot be empty`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid {param}: missing required parameter")]
    Missing { param: String },

    #[error("Invalid {param}: expected a string")]
    NotAString { param: String },

    #[error("Invalid {param}: {param} cannot be empty")]
    Empty { param: String },
}

/// Failure of a tool's underlying operation.
///
/// The `Display` output is the bare cause; the invoker adds the
/// `Error <doing X>: ` prefix when shaping the response.
#[derive(Debug, Error)]
pub enum HandlerFailure {
    /// A required credential or setting is missing.
    #[error("{0}")]
    NotConfigured(String),

    /// The remote backend answered with an error status or an unusable body.
    #[error("{0}")]
    Backend(String),

    /// Transport-level HTTP failure.
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// Local filesystem failure.
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Payload could not be (de)serialized.
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    /// The artifact store rejected the operation.
    #[error("{0}")]
    Artifact(#[from] ArtifactError),

    /// The call was cancelled because its session went away.
    #[error("operation cancelled")]
    Cancelled,
}

impl HandlerFailure {
    /// Create a new "not configured" failure.
    pub fn not_configured(msg: impl Into<String>) -> Self {
        Self::NotConfigured(msg.into())
    }

    /// Create a new backend failure.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_name_the_parameter() {
        let err = ValidationError::Empty {
            param: "prompt".into(),
        };
        assert_eq!(err.to_string(), "Invalid prompt: prompt cannot be empty");
    }

    #[test]
    fn handler_failure_displays_bare_cause() {
        let err = HandlerFailure::not_configured("Tavily API key is not configured");
        assert_eq!(err.to_string(), "Tavily API key is not configured");
        assert_eq!(HandlerFailure::Cancelled.to_string(), "operation cancelled");
    }
}
