//! Backend entry-point: reads configuration from the environment, wires the
//! persistence and storage adapters, and serves the REST endpoints.

mod server;

use std::env;
use std::net::SocketAddr;

use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

use server::ServerConfig;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let database_url = env::var("DATABASE_URL")
        .map_err(|_| std::io::Error::other("DATABASE_URL must be set"))?;
    let bind_addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".into())
        .parse()
        .map_err(|error| std::io::Error::other(format!("invalid BIND_ADDR: {error}")))?;
    let storage_root = env::var("STORAGE_ROOT").unwrap_or_else(|_| "./storage".into());
    let public_url_prefix = env::var("PUBLIC_URL_PREFIX").unwrap_or_else(|_| "/storage".into());

    let config =
        ServerConfig::new(bind_addr, database_url).with_storage(storage_root, public_url_prefix);
    server::run(config).await
}
