//! Profile domain types.
//!
//! Purpose: strongly typed building blocks for the profile update use case.
//! Each newtype validates on construction so the service and adapters never
//! see malformed identifiers, emails, or photo payloads.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// Maximum accepted profile photo size in bytes.
pub const MAX_PHOTO_BYTES: usize = 2 * 1024 * 1024;

/// Validation errors for profile inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileValidationError {
    /// Kind path segment is not `staff` or `member`.
    #[error("unknown profile kind '{value}'")]
    UnknownKind { value: String },
    /// External identifier is empty or carries surrounding whitespace.
    #[error("external id must be a non-empty string without surrounding whitespace")]
    InvalidExternalId,
    /// Email fails the syntactic check.
    #[error("'{value}' is not a valid email address")]
    InvalidEmail { value: String },
    /// Photo payload exceeds [`MAX_PHOTO_BYTES`].
    #[error("photo exceeds the maximum size of {max} bytes (got {actual})")]
    PhotoTooLarge { max: usize, actual: usize },
    /// Photo content type is outside the image allow-list.
    #[error("unsupported photo content type '{content_type}'; expected jpeg, png, or gif")]
    UnsupportedPhotoType { content_type: String },
}

impl ProfileValidationError {
    /// Name of the request field the error refers to, for error details.
    pub fn field(&self) -> &'static str {
        match self {
            Self::UnknownKind { .. } => "kind",
            Self::InvalidExternalId => "external_id",
            Self::InvalidEmail { .. } => "email",
            Self::PhotoTooLarge { .. } | Self::UnsupportedPhotoType { .. } => "profile",
        }
    }
}

/// Entity kind selecting the backing table pair.
///
/// Staff and member profiles share one algorithm; the kind only decides
/// which profile table and which history table an operation touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileKind {
    Staff,
    Member,
}

impl ProfileKind {
    /// Capitalised label used in client-facing messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Staff => "Staff",
            Self::Member => "Member",
        }
    }
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Staff => f.write_str("staff"),
            Self::Member => f.write_str("member"),
        }
    }
}

impl FromStr for ProfileKind {
    type Err = ProfileValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "staff" => Ok(Self::Staff),
            "member" => Ok(Self::Member),
            other => Err(ProfileValidationError::UnknownKind {
                value: other.to_owned(),
            }),
        }
    }
}

/// Stable caller-visible record key.
///
/// Distinct from the storage primary key; every lookup in this service goes
/// through it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExternalId(String);

impl ExternalId {
    /// Validate and construct an [`ExternalId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ProfileValidationError> {
        let value = value.into();
        if value.is_empty() || value.trim() != value {
            return Err(ProfileValidationError::InvalidExternalId);
        }
        Ok(Self(value))
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ExternalId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    // The pattern is a compile-time constant; failure here is a programmer error.
    EMAIL_RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles"))
}

/// Syntactically validated email address.
///
/// Uniqueness per kind is a persistence concern; the adapter maps unique
/// violations back into a validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    pub fn new(value: impl Into<String>) -> Result<Self, ProfileValidationError> {
        let value = value.into();
        if !email_regex().is_match(&value) {
            return Err(ProfileValidationError::InvalidEmail { value });
        }
        Ok(Self(value))
    }

    /// Borrow the address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Accepted profile photo formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
}

impl ImageFormat {
    /// Map a MIME essence string onto the allow-list.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type {
            "image/jpeg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            "image/gif" => Some(Self::Gif),
            _ => None,
        }
    }

    /// Canonical file extension for the format.
    pub fn canonical_extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Gif => "gif",
        }
    }

    /// MIME essence string for the format.
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
        }
    }
}

const ALLOWED_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];

/// Validated profile photo payload.
///
/// Construction enforces the size ceiling and the content-type allow-list
/// before any mutation is attempted. The extension is taken from the client
/// file name when it is itself allow-listed, falling back to the format's
/// canonical extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoUpload {
    bytes: Vec<u8>,
    format: ImageFormat,
    extension: String,
}

impl PhotoUpload {
    /// Validate and construct a [`PhotoUpload`].
    pub fn new(
        bytes: Vec<u8>,
        content_type: &str,
        file_name: Option<&str>,
    ) -> Result<Self, ProfileValidationError> {
        let format = ImageFormat::from_content_type(content_type).ok_or_else(|| {
            ProfileValidationError::UnsupportedPhotoType {
                content_type: content_type.to_owned(),
            }
        })?;
        if bytes.len() > MAX_PHOTO_BYTES {
            return Err(ProfileValidationError::PhotoTooLarge {
                max: MAX_PHOTO_BYTES,
                actual: bytes.len(),
            });
        }
        let extension = file_name
            .and_then(client_extension)
            .unwrap_or_else(|| format.canonical_extension().to_owned());
        Ok(Self {
            bytes,
            format,
            extension,
        })
    }

    /// Photo format from the declared content type.
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// File extension to preserve on the stored key.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Payload size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Consume the upload, returning the raw bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

fn client_extension(file_name: &str) -> Option<String> {
    let (_, extension) = file_name.rsplit_once('.')?;
    let extension = extension.to_ascii_lowercase();
    ALLOWED_EXTENSIONS
        .contains(&extension.as_str())
        .then_some(extension)
}

/// Snapshot of the mutable profile fields as loaded from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRecord {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: String,
    /// Stored blob key of the current photo, e.g. `profiles/<uuid>.png`.
    pub photo: Option<String>,
}

/// Full post-coalescing field values written back in one update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub photo_path: Option<String>,
}
