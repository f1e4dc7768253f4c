//! Port for binary asset storage.

use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by blob storage adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlobStoreError {
    /// Underlying storage I/O failed.
    #[error("blob storage I/O failed: {message}")]
    Io { message: String },
    /// The stored key is malformed or escapes the storage root.
    #[error("invalid blob key '{key}'")]
    InvalidKey { key: String },
}

impl BlobStoreError {
    /// Helper for I/O failures.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Helper for malformed keys.
    pub fn invalid_key(key: impl Into<String>) -> Self {
        Self::InvalidKey { key: key.into() }
    }
}

/// Port for storing, deleting, and resolving binary assets.
///
/// Stored keys are opaque strings of the form `<namespace>/<key>`; records
/// persist them verbatim and resolve them to public URLs on the way out.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Persist a payload under `namespace/key`, returning the stored key.
    async fn put(
        &self,
        namespace: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, BlobStoreError>;

    /// Delete a stored object.
    ///
    /// Returns `Ok(false)` when the object was already gone, which callers
    /// treat the same as a successful deletion.
    async fn delete(&self, stored_key: &str) -> Result<bool, BlobStoreError>;

    /// Map a stored key to its externally resolvable URL.
    fn public_url(&self, stored_key: &str) -> String;
}
