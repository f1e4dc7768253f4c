//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports describe how the domain expects to talk to adapters
//! (database, blob storage); the driving port is what inbound adapters call.
//! Each trait exposes a strongly typed error enum so adapters map their
//! failures into predictable variants.

mod audit_repository;
mod blob_store;
mod profile_command;
mod profile_repository;

pub use self::audit_repository::{AuditRepository, AuditRepositoryError};
pub use self::blob_store::{BlobStore, BlobStoreError};
pub use self::profile_command::{ProfileCommand, ProfileFieldsOutcome, UpdateProfileFields};
pub use self::profile_repository::{ProfileRepository, ProfileRepositoryError};

#[cfg(test)]
pub use self::audit_repository::MockAuditRepository;
#[cfg(test)]
pub use self::blob_store::MockBlobStore;
#[cfg(test)]
pub use self::profile_command::MockProfileCommand;
#[cfg(test)]
pub use self::profile_repository::MockProfileRepository;
