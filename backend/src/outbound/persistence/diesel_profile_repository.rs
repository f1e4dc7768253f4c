//! PostgreSQL-backed profile and audit repositories using Diesel.
//!
//! One adapter serves both entity kinds. Staff and member tables share a
//! shape, so the per-kind dispatch is a `macro_rules!` expansion over the
//! table pair rather than two hand-maintained copies of every query.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{
    AuditRepository, AuditRepositoryError, ProfileRepository, ProfileRepositoryError,
};
use crate::domain::{
    AuditEntry, EmailAddress, ExternalId, ProfileChanges, ProfileKind, ProfileRecord,
};

use super::pool::{DbPool, PoolError};

/// Expand `$body` with `$profiles` aliased to the kind's profile table.
macro_rules! with_profile_table {
    ($kind:expr, $profiles:ident, $body:expr) => {
        match $kind {
            ProfileKind::Staff => {
                use crate::outbound::persistence::schema::staff_profiles as $profiles;
                $body
            }
            ProfileKind::Member => {
                use crate::outbound::persistence::schema::member_profiles as $profiles;
                $body
            }
        }
    };
}

/// Expand `$body` with `$history` aliased to the kind's history table.
macro_rules! with_history_table {
    ($kind:expr, $history:ident, $body:expr) => {
        match $kind {
            ProfileKind::Staff => {
                use crate::outbound::persistence::schema::staff_profile_history as $history;
                $body
            }
            ProfileKind::Member => {
                use crate::outbound::persistence::schema::member_profile_history as $history;
                $body
            }
        }
    };
}

/// Expand `$body` with both tables of the kind aliased.
macro_rules! with_kind_tables {
    ($kind:expr, $profiles:ident, $history:ident, $body:expr) => {
        match $kind {
            ProfileKind::Staff => {
                use crate::outbound::persistence::schema::staff_profile_history as $history;
                use crate::outbound::persistence::schema::staff_profiles as $profiles;
                $body
            }
            ProfileKind::Member => {
                use crate::outbound::persistence::schema::member_profile_history as $history;
                use crate::outbound::persistence::schema::member_profiles as $profiles;
                $body
            }
        }
    };
}

/// Diesel-backed implementation of the profile and audit ports.
#[derive(Clone)]
pub struct DieselProfileRepository {
    pool: DbPool,
}

impl DieselProfileRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ProfileRepositoryError {
    ProfileRepositoryError::connection(error.to_string())
}

fn map_diesel_error(error: DieselError) -> ProfileRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ProfileRepositoryError::connection("database connection error")
        }
        _ => ProfileRepositoryError::query("database error"),
    }
}

/// Error type threaded through the email transaction closure.
///
/// `UnknownProfile` aborts the transaction (rolling back the audit insert
/// never issued) without conflating it with a database failure.
enum EmailTxError {
    UnknownProfile,
    Diesel(DieselError),
}

impl From<DieselError> for EmailTxError {
    fn from(error: DieselError) -> Self {
        Self::Diesel(error)
    }
}

fn map_email_tx_error(
    error: EmailTxError,
    external_id: &ExternalId,
    email: &EmailAddress,
) -> ProfileRepositoryError {
    match error {
        EmailTxError::UnknownProfile => {
            ProfileRepositoryError::unknown_profile(external_id.as_str())
        }
        EmailTxError::Diesel(DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            info,
        )) => {
            debug!(
                message = info.message(),
                "email unique constraint violated"
            );
            ProfileRepositoryError::email_taken(email.as_str())
        }
        EmailTxError::Diesel(error) => ProfileRepositoryError::transaction(error.to_string()),
    }
}

type ProfileRow = (Option<String>, Option<String>, String, Option<String>);

#[async_trait]
impl ProfileRepository for DieselProfileRepository {
    async fn find(
        &self,
        kind: ProfileKind,
        external_id: &ExternalId,
    ) -> Result<Option<ProfileRecord>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ProfileRow> = with_profile_table!(kind, profiles, {
            profiles::table
                .filter(profiles::external_id.eq(external_id.as_str()))
                .select((
                    profiles::name,
                    profiles::phone,
                    profiles::email,
                    profiles::photo_path,
                ))
                .first(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)?
        });
        Ok(row.map(|(name, phone, email, photo)| ProfileRecord {
            name,
            phone,
            email,
            photo,
        }))
    }

    async fn apply_update(
        &self,
        kind: ProfileKind,
        external_id: &ExternalId,
        changes: &ProfileChanges,
    ) -> Result<(), ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = with_profile_table!(kind, profiles, {
            diesel::update(profiles::table.filter(profiles::external_id.eq(external_id.as_str())))
                .set((
                    profiles::name.eq(changes.name.as_deref()),
                    profiles::phone.eq(changes.phone.as_deref()),
                    profiles::photo_path.eq(changes.photo_path.as_deref()),
                    profiles::updated_at.eq(diesel::dsl::now),
                ))
                .execute(&mut conn)
                .await
                .map_err(map_diesel_error)?
        });
        if updated == 0 {
            return Err(ProfileRepositoryError::unknown_profile(
                external_id.as_str(),
            ));
        }
        Ok(())
    }

    async fn update_email_with_audit(
        &self,
        kind: ProfileKind,
        external_id: &ExternalId,
        email: &EmailAddress,
        description: &str,
        recorded_at: DateTime<Utc>,
    ) -> Result<(), ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let result: Result<(), EmailTxError> = with_kind_tables!(kind, profiles, history, {
            conn.transaction(|conn| {
                async move {
                    let updated = diesel::update(
                        profiles::table.filter(profiles::external_id.eq(external_id.as_str())),
                    )
                    .set((
                        profiles::email.eq(email.as_str()),
                        profiles::updated_at.eq(diesel::dsl::now),
                    ))
                    .execute(conn)
                    .await?;
                    if updated == 0 {
                        return Err(EmailTxError::UnknownProfile);
                    }

                    diesel::insert_into(history::table)
                        .values((
                            history::external_id.eq(external_id.as_str()),
                            history::description.eq(description),
                            history::recorded_at.eq(recorded_at),
                        ))
                        .execute(conn)
                        .await?;
                    Ok(())
                }
                .scope_boxed()
            })
            .await
        });

        result.map_err(|error| map_email_tx_error(error, external_id, email))
    }
}

#[async_trait]
impl AuditRepository for DieselProfileRepository {
    async fn append(
        &self,
        kind: ProfileKind,
        entry: &AuditEntry,
    ) -> Result<(), AuditRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|error| AuditRepositoryError::connection(error.to_string()))?;
        with_history_table!(kind, history, {
            diesel::insert_into(history::table)
                .values((
                    history::external_id.eq(entry.external_id.as_str()),
                    history::description.eq(entry.description.as_str()),
                    history::recorded_at.eq(entry.recorded_at),
                ))
                .execute(&mut conn)
                .await
                .map_err(|error| AuditRepositoryError::insert(error.to_string()))?
        });
        debug!(kind = %kind, external_id = %entry.external_id, "audit row appended");
        Ok(())
    }
}
