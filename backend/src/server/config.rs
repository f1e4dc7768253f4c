//! HTTP server configuration object.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) database_url: String,
    pub(crate) storage_root: PathBuf,
    pub(crate) public_url_prefix: String,
}

impl ServerConfig {
    /// Construct a server configuration with default storage settings.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, database_url: impl Into<String>) -> Self {
        Self {
            bind_addr,
            database_url: database_url.into(),
            storage_root: PathBuf::from("./storage"),
            public_url_prefix: "/storage".into(),
        }
    }

    /// Override where blobs are written and how their URLs are prefixed.
    #[must_use]
    pub fn with_storage(mut self, root: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        self.storage_root = root.into();
        self.public_url_prefix = prefix.into();
        self
    }
}
