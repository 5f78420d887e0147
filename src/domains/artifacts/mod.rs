//! Artifacts domain module.
//!
//! Generated binaries (for example synthesized audio) are stored under an
//! opaque random id and pulled back by clients through the HTTP transport.

mod error;
mod store;

pub use error::ArtifactError;
pub use store::{ArtifactId, ArtifactLinker, ArtifactStore};
