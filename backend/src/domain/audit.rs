//! Audit trail entries and change rendering.
//!
//! Every detected change set produces exactly one history row with a
//! human-readable description. Rendering rules:
//!
//! - field entries read `Name: 'old' → 'new'` and are emitted only when a
//!   value was actually supplied and differs from the stored one;
//! - a photo upload always contributes the fixed `Photo changed.` marker;
//! - entries are joined with `"; "`.

use chrono::{DateTime, Utc};

use super::profile::ExternalId;

/// Fixed marker recorded whenever a new photo payload was supplied.
pub(crate) const PHOTO_CHANGED_MARKER: &str = "Photo changed.";

/// Separator between individual change descriptions.
pub(crate) const CHANGE_SEPARATOR: &str = "; ";

/// One immutable history row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    /// External identifier of the owning record.
    pub external_id: ExternalId,
    /// Human-readable description of the change set.
    pub description: String,
    /// Server-assigned timestamp.
    pub recorded_at: DateTime<Utc>,
}

/// Render a field change entry, or `None` when nothing observable changed.
///
/// A change is observable only when a non-empty value was supplied and it
/// differs from the snapshot. A missing old value renders as the empty
/// string, matching the audit format clients already parse.
pub(crate) fn render_field_change(
    label: &str,
    old: Option<&str>,
    supplied: Option<&str>,
) -> Option<String> {
    let new = supplied.filter(|value| !value.is_empty())?;
    if old == Some(new) {
        return None;
    }
    Some(format!("{label}: '{}' → '{new}'", old.unwrap_or_default()))
}

/// Render the email change description for the email-only path.
pub(crate) fn render_email_change(email: &str) -> String {
    format!("Email changed to {email}.")
}
