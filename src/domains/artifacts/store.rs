//! Filesystem-backed artifact store.
//!
//! Artifacts live flat under one root as `<id>.<ext>`. Ids are random v4 UUIDs
//! in simple form, so they cannot be enumerated and never contain separators.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use uuid::Uuid;

use super::error::ArtifactError;

/// Length of an id: a UUID rendered without dashes.
const ID_LEN: usize = 32;

/// Bytes written between two cancellation checks.
const WRITE_CHUNK: usize = 64 * 1024;

/// Opaque identifier of a stored artifact.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactId(String);

impl ArtifactId {
    fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Parse an id received from the outside world.
    pub fn parse(raw: &str) -> Option<Self> {
        let valid = raw.len() == ID_LEN
            && raw
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c));
        valid.then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stores generated binaries and serves them back by id.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the root directory if needed.
    pub async fn ensure_root(&self) -> Result<(), ArtifactError> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    fn path_for(&self, id: &ArtifactId, ext: &str) -> PathBuf {
        self.root.join(format!("{}.{}", id, ext))
    }

    /// Persist `bytes` and return the new id.
    ///
    /// The file becomes visible only once fully written. Dropping the returned
    /// future stops the write and removes the partial file.
    pub async fn store(&self, bytes: &[u8], ext: &str) -> Result<ArtifactId, ArtifactError> {
        self.ensure_root().await?;
        let id = ArtifactId::generate();
        let tmp = self.root.join(format!(".{}.{}.part", id, ext));
        let target = self.path_for(&id, ext);
        let payload = Bytes::copy_from_slice(bytes);

        let abort = CancellationToken::new();
        let _abort_on_drop = abort.clone().drop_guard();
        tokio::task::spawn_blocking(move || write_atomically(&tmp, &target, &payload, &abort))
            .await
            .map_err(io::Error::other)??;

        info!(artifact = %id, size = bytes.len(), "Stored artifact");
        Ok(id)
    }

    /// Read an artifact back. Malformed or unknown ids are `NotFound`.
    pub async fn fetch(&self, raw_id: &str, ext: &str) -> Result<Bytes, ArtifactError> {
        let id = ArtifactId::parse(raw_id).ok_or_else(|| ArtifactError::not_found(raw_id))?;
        match tokio::fs::read(self.path_for(&id, ext)).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(artifact = raw_id, "Artifact not found");
                Err(ArtifactError::not_found(raw_id))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Write `bytes` to `tmp` in chunks, then rename it to `target`.
///
/// Stops between chunks once `abort` fires. On any failure the temp file is
/// removed.
fn write_atomically(
    tmp: &Path,
    target: &Path,
    bytes: &[u8],
    abort: &CancellationToken,
) -> io::Result<()> {
    let cancelled = || io::Error::new(io::ErrorKind::Interrupted, "artifact write cancelled");
    let result = (|| {
        let mut file = std::fs::File::create(tmp)?;
        for chunk in bytes.chunks(WRITE_CHUNK) {
            if abort.is_cancelled() {
                return Err(cancelled());
            }
            file.write_all(chunk)?;
        }
        drop(file);
        if abort.is_cancelled() {
            return Err(cancelled());
        }
        std::fs::rename(tmp, target)
    })();

    if let Err(e) = &result {
        debug!(path = %tmp.display(), "Discarding partial artifact: {}", e);
        let _ = std::fs::remove_file(tmp);
    }
    result
}

/// Turns stored artifact ids into public URLs.
#[derive(Debug, Clone)]
pub struct ArtifactLinker {
    store: Arc<ArtifactStore>,
    base_url: String,
    route: String,
}

impl ArtifactLinker {
    /// `base_url` like `http://localhost:3001`, `route` like `mp3`.
    pub fn new(store: Arc<ArtifactStore>, base_url: impl Into<String>, route: impl Into<String>) -> Self {
        Self {
            store,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            route: route.into().trim_matches('/').to_string(),
        }
    }

    pub fn url_for(&self, id: &ArtifactId, ext: &str) -> String {
        format!("{}/{}/{}.{}", self.base_url, self.route, id, ext)
    }

    /// Store and return the public URL in one step.
    pub async fn publish(&self, bytes: &[u8], ext: &str) -> Result<String, ArtifactError> {
        let id = self.store.store(bytes, ext).await?;
        Ok(self.url_for(&id, ext))
    }
}
