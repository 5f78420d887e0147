//! Artifact-specific error types.

use thiserror::Error;

/// Errors that can occur while storing or fetching artifacts.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// No artifact exists under this id (or the id is malformed).
    #[error("Artifact not found: {0}")]
    NotFound(String),

    /// Filesystem failure while reading or writing.
    #[error("Artifact I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ArtifactError {
    /// Create a new "not found" error.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }
}
