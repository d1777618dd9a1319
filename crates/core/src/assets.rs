//! On-disk storage for map and extension payloads.
//!
//! Payloads are opaque blobs stored under `<root>/<kind dir>/<id>.<ext>`,
//! where `id` is the generated id of the owning record.

use std::path::{Path, PathBuf};

use crate::types::DbId;

/// The two kinds of uploadable content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Map,
    Extension,
}

impl AssetKind {
    /// Sub-directory below the storage root.
    pub fn dir(self) -> &'static str {
        match self {
            Self::Map => "maps",
            Self::Extension => "extensions",
        }
    }

    /// Fixed file extension for the payload.
    pub fn file_extension(self) -> &'static str {
        match self {
            Self::Map => "svw",
            Self::Extension => "jar",
        }
    }

    /// Entity label used in errors and logs.
    pub fn label(self) -> &'static str {
        match self {
            Self::Map => "Map",
            Self::Extension => "Extension",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(PathBuf),

    #[error("Asset I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Filesystem-backed asset store.
#[derive(Debug, Clone)]
pub struct LocalAssetStore {
    root: PathBuf,
}

impl LocalAssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the per-kind directories. Called once at startup.
    pub async fn ensure_layout(&self) -> Result<(), AssetError> {
        for kind in [AssetKind::Map, AssetKind::Extension] {
            tokio::fs::create_dir_all(self.root.join(kind.dir())).await?;
        }
        Ok(())
    }

    /// Path of the payload for `id`.
    pub fn path_for(&self, kind: AssetKind, id: DbId) -> PathBuf {
        self.root
            .join(kind.dir())
            .join(format!("{id}.{}", kind.file_extension()))
    }

    /// Write (or overwrite) the payload for `id`.
    pub async fn write(&self, kind: AssetKind, id: DbId, bytes: &[u8]) -> Result<(), AssetError> {
        let path = self.path_for(kind, id);
        tokio::fs::write(&path, bytes).await?;
        tracing::debug!(path = %path.display(), size = bytes.len(), "Asset written");
        Ok(())
    }

    /// Read the payload for `id`.
    pub async fn read(&self, kind: AssetKind, id: DbId) -> Result<Vec<u8>, AssetError> {
        let path = self.path_for(kind, id);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(AssetError::NotFound(path)),
            Err(e) => Err(AssetError::Io(e)),
        }
    }
}
