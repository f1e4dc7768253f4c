//! Domain types, ports, and the profile update use case.
//!
//! Everything in this module is transport and persistence agnostic. Inbound
//! adapters call the [`ports::ProfileCommand`] driving port; driven adapters
//! implement the repository and blob-store ports.

pub mod audit;
pub mod error;
pub mod ports;
pub mod profile;
pub mod profile_service;

pub use self::audit::AuditEntry;
pub use self::error::{Error, ErrorCode};
pub use self::profile::{
    EmailAddress, ExternalId, ImageFormat, PhotoUpload, ProfileChanges, ProfileKind,
    ProfileRecord, ProfileValidationError, MAX_PHOTO_BYTES,
};
pub use self::profile_service::ProfileService;
