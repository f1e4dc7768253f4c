//! Filesystem-backed blob store.
//!
//! Blobs live under a configured root directory; the stored key
//! `<namespace>/<key>` doubles as the relative path on disk. Public URLs are
//! the stored key prefixed with the configured public prefix, matching how a
//! reverse proxy or static-file layer exposes the directory.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::domain::ports::{BlobStore, BlobStoreError};

/// Blob store writing to the local filesystem.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
    public_prefix: String,
}

impl FsBlobStore {
    /// Create a store rooted at `root`, serving URLs under `public_prefix`.
    pub fn new(root: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_prefix: public_prefix.into(),
        }
    }

    /// Resolve a stored key to its on-disk path, rejecting keys that would
    /// escape the storage root.
    fn blob_path(&self, stored_key: &str) -> Result<PathBuf, BlobStoreError> {
        let relative = Path::new(stored_key);
        let safe = relative.components().all(|component| {
            matches!(component, Component::Normal(part) if !part.to_string_lossy().is_empty())
        });
        if stored_key.is_empty() || !safe {
            return Err(BlobStoreError::invalid_key(stored_key));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn put(
        &self,
        namespace: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, BlobStoreError> {
        let stored_key = format!("{namespace}/{key}");
        let path = self.blob_path(&stored_key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|error| BlobStoreError::io(error.to_string()))?;
        }
        let size = bytes.len();
        fs::write(&path, bytes)
            .await
            .map_err(|error| BlobStoreError::io(error.to_string()))?;
        debug!(key = %stored_key, content_type, size, "blob stored");
        Ok(stored_key)
    }

    async fn delete(&self, stored_key: &str) -> Result<bool, BlobStoreError> {
        let path = self.blob_path(stored_key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(false),
            Err(error) => Err(BlobStoreError::io(error.to_string())),
        }
    }

    fn public_url(&self, stored_key: &str) -> String {
        format!(
            "{}/{stored_key}",
            self.public_prefix.trim_end_matches('/')
        )
    }
}
