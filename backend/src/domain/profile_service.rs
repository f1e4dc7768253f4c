//! Profile update use case.
//!
//! Implements the [`ProfileCommand`] driving port once for both entity
//! kinds. The service owns the update algorithm: load, snapshot, photo
//! lifecycle, fill-if-present coalescing, diffing, and the audit append.
//! Persistence and blob storage stay behind ports; the clock is injected so
//! audit timestamps are deterministic in tests.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::audit::{
    AuditEntry, render_email_change, render_field_change, CHANGE_SEPARATOR, PHOTO_CHANGED_MARKER,
};
use crate::domain::error::Error;
use crate::domain::ports::{
    AuditRepository, AuditRepositoryError, BlobStore, ProfileCommand, ProfileFieldsOutcome,
    ProfileRepository, ProfileRepositoryError, UpdateProfileFields,
};
use crate::domain::profile::{EmailAddress, ExternalId, PhotoUpload, ProfileChanges, ProfileKind};

/// Blob storage namespace for profile photos.
const PHOTO_NAMESPACE: &str = "profiles";

/// Profile update service implementing the driving port.
#[derive(Clone)]
pub struct ProfileService<R, A, B> {
    profiles: Arc<R>,
    audits: Arc<A>,
    blobs: Arc<B>,
    clock: Arc<dyn Clock>,
}

impl<R, A, B> ProfileService<R, A, B> {
    /// Create a new service with the given adapters and clock.
    pub fn new(profiles: Arc<R>, audits: Arc<A>, blobs: Arc<B>, clock: Arc<dyn Clock>) -> Self {
        Self {
            profiles,
            audits,
            blobs,
            clock,
        }
    }
}

/// Fill-if-present coalescing: absent or empty input keeps the old value.
///
/// An explicitly supplied empty string is treated as "no change", not as
/// "clear the field". Documented policy; see the audit rendering rules which
/// apply the same presence check.
fn fill_if_present(supplied: Option<String>, current: Option<String>) -> Option<String> {
    match supplied {
        Some(value) if !value.is_empty() => Some(value),
        _ => current,
    }
}

/// Map repository failures on the email path, where an unresolved id is an
/// input-validation failure rather than a missing resource.
fn map_profile_repository_error(error: ProfileRepositoryError) -> Error {
    match error {
        ProfileRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("profile repository unavailable: {message}"))
        }
        ProfileRepositoryError::Query { message } => {
            Error::internal(format!("profile repository error: {message}"))
        }
        ProfileRepositoryError::UnknownProfile { external_id } => {
            Error::invalid_request("no record matches the given id")
                .with_details(json!({ "field": "id", "value": external_id }))
        }
        ProfileRepositoryError::EmailTaken { email } => {
            Error::invalid_request("email is already registered").with_details(json!({
                "field": "email",
                "value": email,
                "constraint": "unique",
            }))
        }
        ProfileRepositoryError::Transaction { message } => {
            Error::internal("failed to update email")
                .with_details(json!({ "error": message }))
        }
    }
}

/// Map repository failures on the field-update path. An unresolved id here
/// means the record vanished between the lookup and the write, which is
/// still a missing resource to the caller.
fn map_field_update_error(kind: ProfileKind, error: ProfileRepositoryError) -> Error {
    match error {
        ProfileRepositoryError::UnknownProfile { external_id } => {
            Error::not_found(format!("{kind} profile not found")).with_details(json!({
                "field": "external_id",
                "value": external_id,
            }))
        }
        other => map_profile_repository_error(other),
    }
}

fn map_audit_repository_error(error: AuditRepositoryError) -> Error {
    match error {
        AuditRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("audit repository unavailable: {message}"))
        }
        AuditRepositoryError::Insert { message } => {
            Error::internal(format!("audit repository error: {message}"))
        }
    }
}

impl<R, A, B> ProfileService<R, A, B>
where
    R: ProfileRepository,
    A: AuditRepository,
    B: BlobStore,
{
    /// Replace the stored photo: best-effort delete of the superseded blob,
    /// then persist the new payload under a fresh collision-resistant key.
    async fn replace_photo(
        &self,
        old_photo: Option<&str>,
        upload: PhotoUpload,
    ) -> Result<String, Error> {
        if let Some(old_key) = old_photo {
            // The old object may already be gone; never abort the update
            // over it.
            match self.blobs.delete(old_key).await {
                Ok(removed) => {
                    debug!(key = old_key, removed, "superseded profile photo deleted");
                }
                Err(error) => {
                    warn!(%error, key = old_key, "failed to delete superseded profile photo");
                }
            }
        }

        let key = format!("{}.{}", Uuid::new_v4(), upload.extension());
        let content_type = upload.format().content_type();
        self.blobs
            .put(PHOTO_NAMESPACE, &key, upload.into_bytes(), content_type)
            .await
            .map_err(|error| Error::internal(format!("failed to store profile photo: {error}")))
    }
}

#[async_trait]
impl<R, A, B> ProfileCommand for ProfileService<R, A, B>
where
    R: ProfileRepository,
    A: AuditRepository,
    B: BlobStore,
{
    async fn update_fields(
        &self,
        request: UpdateProfileFields,
    ) -> Result<ProfileFieldsOutcome, Error> {
        let UpdateProfileFields {
            kind,
            external_id,
            name,
            phone,
            photo,
        } = request;

        let record = self
            .profiles
            .find(kind, &external_id)
            .await
            .map_err(|error| map_field_update_error(kind, error))?
            .ok_or_else(|| {
                Error::not_found(format!("{} profile not found", kind)).with_details(json!({
                    "field": "external_id",
                    "value": external_id.as_str(),
                }))
            })?;

        let photo_supplied = photo.is_some();
        let photo_path = match photo {
            Some(upload) => Some(self.replace_photo(record.photo.as_deref(), upload).await?),
            None => record.photo.clone(),
        };

        let mut changes = Vec::new();
        if let Some(entry) = render_field_change("Name", record.name.as_deref(), name.as_deref()) {
            changes.push(entry);
        }
        if let Some(entry) = render_field_change("Phone", record.phone.as_deref(), phone.as_deref())
        {
            changes.push(entry);
        }
        if photo_supplied {
            // Recorded whenever an upload was supplied, even if the content
            // is identical to the previous photo.
            changes.push(PHOTO_CHANGED_MARKER.to_owned());
        }

        let updated = ProfileChanges {
            name: fill_if_present(name, record.name),
            phone: fill_if_present(phone, record.phone),
            photo_path: photo_path.clone(),
        };
        self.profiles
            .apply_update(kind, &external_id, &updated)
            .await
            .map_err(|error| map_field_update_error(kind, error))?;

        if !changes.is_empty() {
            let entry = AuditEntry {
                external_id: external_id.clone(),
                description: changes.join(CHANGE_SEPARATOR),
                recorded_at: self.clock.utc(),
            };
            self.audits
                .append(kind, &entry)
                .await
                .map_err(map_audit_repository_error)?;
        }

        Ok(ProfileFieldsOutcome {
            photo_url: photo_path.map(|key| self.blobs.public_url(&key)),
        })
    }

    async fn update_email(
        &self,
        kind: ProfileKind,
        external_id: ExternalId,
        email: EmailAddress,
    ) -> Result<(), Error> {
        let description = render_email_change(email.as_str());
        self.profiles
            .update_email_with_audit(kind, &external_id, &email, &description, self.clock.utc())
            .await
            .map_err(map_profile_repository_error)
    }
}

#[cfg(test)]
#[path = "profile_service_tests.rs"]
mod tests;
