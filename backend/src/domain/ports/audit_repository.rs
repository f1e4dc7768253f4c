//! Port for the append-only audit trail.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::audit::AuditEntry;
use crate::domain::profile::ProfileKind;

/// Errors surfaced by audit repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuditRepositoryError {
    /// Database connectivity failures.
    #[error("audit repository connection failed: {message}")]
    Connection { message: String },
    /// Insert failed during execution.
    #[error("audit repository insert failed: {message}")]
    Insert { message: String },
}

impl AuditRepositoryError {
    /// Helper for connection failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for insert failures.
    pub fn insert(message: impl Into<String>) -> Self {
        Self::Insert {
            message: message.into(),
        }
    }
}

/// Port for appending history rows.
///
/// Rows are immutable once written; there is no update or delete surface.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuditRepository: Send + Sync {
    /// Append one history row to the kind's history table.
    async fn append(
        &self,
        kind: ProfileKind,
        entry: &AuditEntry,
    ) -> Result<(), AuditRepositoryError>;
}
