//! Port for profile record persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::profile::{EmailAddress, ExternalId, ProfileChanges, ProfileKind, ProfileRecord};

/// Errors surfaced by profile repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileRepositoryError {
    /// Database connectivity failures.
    #[error("profile repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("profile repository query failed: {message}")]
    Query { message: String },
    /// No record matches the external identifier.
    #[error("no profile found for external id '{external_id}'")]
    UnknownProfile { external_id: String },
    /// The email is already registered for another record of the same kind.
    #[error("email '{email}' is already in use")]
    EmailTaken { email: String },
    /// The atomic email-plus-audit transaction failed and was rolled back.
    #[error("email update transaction failed: {message}")]
    Transaction { message: String },
}

impl ProfileRepositoryError {
    /// Helper for connection failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Helper for unresolved identifiers.
    pub fn unknown_profile(external_id: impl Into<String>) -> Self {
        Self::UnknownProfile {
            external_id: external_id.into(),
        }
    }

    /// Helper for per-kind email uniqueness violations.
    pub fn email_taken(email: impl Into<String>) -> Self {
        Self::EmailTaken {
            email: email.into(),
        }
    }

    /// Helper for rolled-back transactions.
    pub fn transaction(message: impl Into<String>) -> Self {
        Self::Transaction {
            message: message.into(),
        }
    }
}

/// Port for loading and mutating profile records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Fetch the mutable field snapshot for a record by external identifier.
    ///
    /// Returns `None` when no record of the given kind matches.
    async fn find(
        &self,
        kind: ProfileKind,
        external_id: &ExternalId,
    ) -> Result<Option<ProfileRecord>, ProfileRepositoryError>;

    /// Write the coalesced field values back in a single update.
    async fn apply_update(
        &self,
        kind: ProfileKind,
        external_id: &ExternalId,
        changes: &ProfileChanges,
    ) -> Result<(), ProfileRepositoryError>;

    /// Update the email column and insert the matching audit row in one
    /// database transaction.
    ///
    /// Either both writes commit or neither does. Adapters must map a
    /// per-kind unique violation to [`ProfileRepositoryError::EmailTaken`]
    /// and an unmatched identifier to
    /// [`ProfileRepositoryError::UnknownProfile`].
    async fn update_email_with_audit(
        &self,
        kind: ProfileKind,
        external_id: &ExternalId,
        email: &EmailAddress,
        description: &str,
        recorded_at: DateTime<Utc>,
    ) -> Result<(), ProfileRepositoryError>;
}
