//! PostgreSQL persistence adapters built on Diesel and `diesel-async`.

mod diesel_profile_repository;
mod pool;
pub mod schema;

pub use diesel_profile_repository::DieselProfileRepository;
pub use pool::{DbPool, PoolError};
