//! HTTP inbound adapter exposing the REST endpoints.

pub mod error;
pub mod health;
pub mod profiles;
pub mod state;

pub use error::ApiResult;
