//! Profile update HTTP handlers.
//!
//! ```text
//! POST /api/v1/profiles/{kind}        multipart {external_id, name?, phone?, profile?}
//! POST /api/v1/profiles/{kind}/email  JSON {"id": ..., "email": ...}
//! ```
//!
//! `{kind}` is `staff` or `member`; both endpoints share one service.

use actix_multipart::form::{bytes::Bytes, text::Text, MultipartForm};
use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::UpdateProfileFields;
use crate::domain::{
    EmailAddress, Error, ExternalId, PhotoUpload, ProfileKind, ProfileValidationError,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Multipart form for the field-update endpoint.
#[derive(Debug, MultipartForm)]
pub struct UpdateProfileForm {
    /// Stable caller-visible record key.
    pub external_id: Text<String>,
    /// Replacement display name; absent or empty keeps the stored one.
    pub name: Option<Text<String>>,
    /// Replacement phone number; absent or empty keeps the stored one.
    pub phone: Option<Text<String>>,
    /// Replacement profile photo (jpeg, png, or gif, at most 2 MiB).
    #[multipart(limit = "2MiB")]
    pub profile: Option<Bytes>,
}

/// JSON body for the email-update endpoint.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateEmailBody {
    /// Stable caller-visible record key.
    pub id: String,
    /// New email address; must be unique within the kind.
    pub email: String,
}

/// JSON body returned on a successful field update.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileUpdatedBody {
    pub message: String,
    /// Public URL of the record's current photo, `null` when none is set.
    pub profile_url: Option<String>,
}

fn map_validation_error(error: ProfileValidationError) -> Error {
    let field = error.field();
    Error::invalid_request(error.to_string()).with_details(json!({ "field": field }))
}

fn parse_kind(segment: &str) -> Result<ProfileKind, Error> {
    segment.parse().map_err(map_validation_error)
}

fn build_photo_upload(field: Bytes) -> Result<PhotoUpload, Error> {
    let content_type = field
        .content_type
        .as_ref()
        .map(|mime| mime.essence_str().to_owned())
        .unwrap_or_default();
    PhotoUpload::new(
        field.data.to_vec(),
        &content_type,
        field.file_name.as_deref(),
    )
    .map_err(map_validation_error)
}

/// Apply partial profile changes and record the audit trail.
#[utoipa::path(
    post,
    path = "/api/v1/profiles/{kind}",
    params(("kind" = String, Path, description = "Profile kind: staff or member")),
    responses(
        (status = 200, description = "Profile updated", body = ProfileUpdatedBody),
        (status = 400, description = "Validation failure", body = crate::inbound::http::error::ErrorBody),
        (status = 404, description = "Unknown external id", body = crate::inbound::http::error::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::inbound::http::error::ErrorBody)
    ),
    tags = ["profiles"],
    operation_id = "updateProfile"
)]
#[post("/profiles/{kind}")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    MultipartForm(form): MultipartForm<UpdateProfileForm>,
) -> ApiResult<HttpResponse> {
    let kind = parse_kind(&path)?;
    let external_id =
        ExternalId::new(form.external_id.into_inner()).map_err(map_validation_error)?;
    let photo = form.profile.map(build_photo_upload).transpose()?;

    let outcome = state
        .profiles
        .update_fields(UpdateProfileFields {
            kind,
            external_id,
            name: form.name.map(Text::into_inner),
            phone: form.phone.map(Text::into_inner),
            photo,
        })
        .await?;

    Ok(HttpResponse::Ok().json(ProfileUpdatedBody {
        message: format!("{} updated successfully", kind.label()),
        profile_url: outcome.photo_url,
    }))
}

/// Change a record's email atomically with its audit entry.
#[utoipa::path(
    post,
    path = "/api/v1/profiles/{kind}/email",
    params(("kind" = String, Path, description = "Profile kind: staff or member")),
    request_body = UpdateEmailBody,
    responses(
        (status = 200, description = "Email updated"),
        (status = 400, description = "Validation failure", body = crate::inbound::http::error::ErrorBody),
        (status = 500, description = "Transaction failure", body = crate::inbound::http::error::ErrorBody)
    ),
    tags = ["profiles"],
    operation_id = "updateEmail"
)]
#[post("/profiles/{kind}/email")]
pub async fn update_email(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateEmailBody>,
) -> ApiResult<HttpResponse> {
    let kind = parse_kind(&path)?;
    let body = payload.into_inner();
    let external_id = ExternalId::new(body.id).map_err(map_validation_error)?;
    let email = EmailAddress::new(body.email).map_err(map_validation_error)?;

    state.profiles.update_email(kind, external_id, email).await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "Email updated successfully." })))
}

#[cfg(test)]
#[path = "profiles_tests.rs"]
mod tests;
