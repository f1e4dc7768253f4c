//! Driving port for profile mutations.
//!
//! HTTP handlers depend on this trait rather than on the concrete service so
//! they stay testable without a database or blob store.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::profile::{EmailAddress, ExternalId, PhotoUpload, ProfileKind};

/// Validated input for the field-update operation.
///
/// `name` and `phone` follow fill-if-present semantics: absent or empty
/// values keep the stored ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateProfileFields {
    pub kind: ProfileKind,
    pub external_id: ExternalId,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub photo: Option<PhotoUpload>,
}

/// Result of a successful field update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileFieldsOutcome {
    /// Public URL of the record's current photo, if one is set.
    pub photo_url: Option<String>,
}

/// Use-case surface invoked by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileCommand: Send + Sync {
    /// Apply partial field changes and record the audit trail.
    async fn update_fields(
        &self,
        request: UpdateProfileFields,
    ) -> Result<ProfileFieldsOutcome, Error>;

    /// Change the record's email atomically with its audit entry.
    async fn update_email(
        &self,
        kind: ProfileKind,
        external_id: ExternalId,
        email: EmailAddress,
    ) -> Result<(), Error>;
}
