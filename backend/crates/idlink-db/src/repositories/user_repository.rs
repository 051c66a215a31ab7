//! User store.
//!
//! All operations are generic over the executor so a request can run its
//! whole read-modify-write sequence on one pooled connection, while lookups
//! can still be issued straight against the pool.

use crate::{DbError, InsertOutcome, Result as DbErrorResult, is_subject_id_conflict};

use idlink_core::{ErrorLocation, PrivacyLevel, User, UserStatus};

use std::panic::Location;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use log::debug;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use uuid::Uuid;

const USER_COLUMNS: &str = r#"
    id, external_subject_id, email, email_verified, display_name,
    pii_encrypted_blob, created_at, updated_at, last_login_at,
    status, privacy_level, consent_version_id
"#;

pub struct UserRepository;

impl UserRepository {
    /// Insert a new user.
    ///
    /// A unique violation on `external_subject_id` is reported as
    /// [`InsertOutcome::Conflict`]; any other failure is an error.
    pub async fn insert<'e, E>(executor: E, user: &User) -> DbErrorResult<InsertOutcome>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let result = sqlx::query(
            r#"
                INSERT INTO users (
                    id, external_subject_id, email, email_verified, display_name,
                    pii_encrypted_blob, created_at, updated_at, last_login_at,
                    status, privacy_level, consent_version_id
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.external_subject_id)
        .bind(&user.email)
        .bind(user.email_verified)
        .bind(&user.display_name)
        .bind(&user.pii_encrypted_blob)
        .bind(user.created_at.timestamp_millis())
        .bind(user.updated_at.timestamp_millis())
        .bind(user.last_login_at.map(|ts| ts.timestamp_millis()))
        .bind(user.status.as_str())
        .bind(user.privacy_level.as_str())
        .bind(user.consent_version_id.map(|id| id.to_string()))
        .execute(executor)
        .await;

        match result {
            Ok(_) => Ok(InsertOutcome::Created),
            Err(err) if is_subject_id_conflict(&err) => {
                debug!(
                    "Insert for subject {} lost to an existing row",
                    user.external_subject_id
                );
                Ok(InsertOutcome::Conflict)
            }
            Err(err) => Err(DbError::from(err)),
        }
    }

    /// Persist every mutable field of an existing user.
    ///
    /// `id`, `external_subject_id` and `created_at` are never rewritten.
    pub async fn update<'e, E>(executor: E, user: &User) -> DbErrorResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let result = sqlx::query(
            r#"
                UPDATE users
                SET email = ?, email_verified = ?, display_name = ?,
                    pii_encrypted_blob = ?, updated_at = ?, last_login_at = ?,
                    status = ?, privacy_level = ?, consent_version_id = ?
                WHERE id = ?
            "#,
        )
        .bind(&user.email)
        .bind(user.email_verified)
        .bind(&user.display_name)
        .bind(&user.pii_encrypted_blob)
        .bind(user.updated_at.timestamp_millis())
        .bind(user.last_login_at.map(|ts| ts.timestamp_millis()))
        .bind(user.status.as_str())
        .bind(user.privacy_level.as_str())
        .bind(user.consent_version_id.map(|id| id.to_string()))
        .bind(user.id.to_string())
        .execute(executor)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                entity: "User",
                key: user.id.to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }

    pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> DbErrorResult<Option<User>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");

        let row = sqlx::query(&sql)
            .bind(id.to_string())
            .fetch_optional(executor)
            .await?;

        row.as_ref().map(user_from_row).transpose()
    }

    pub async fn find_by_external_subject_id<'e, E>(
        executor: E,
        external_subject_id: &str,
    ) -> DbErrorResult<Option<User>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE external_subject_id = ?");

        let row = sqlx::query(&sql)
            .bind(external_subject_id)
            .fetch_optional(executor)
            .await?;

        row.as_ref().map(user_from_row).transpose()
    }

    /// Number of rows for a subject. Always 0 or 1 while the unique index holds.
    pub async fn count_by_external_subject_id<'e, E>(
        executor: E,
        external_subject_id: &str,
    ) -> DbErrorResult<i64>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE external_subject_id = ?")
                .bind(external_subject_id)
                .fetch_one(executor)
                .await?;

        Ok(count)
    }
}

fn user_from_row(r: &SqliteRow) -> DbErrorResult<User> {
    let id: String = r.try_get("id")?;
    let status: String = r.try_get("status")?;
    let privacy_level: String = r.try_get("privacy_level")?;
    let consent_version_id: Option<String> = r.try_get("consent_version_id")?;
    let last_login_at: Option<i64> = r.try_get("last_login_at")?;

    Ok(User {
        id: Uuid::parse_str(&id).map_err(|e| DbError::decode("users", "id", e))?,
        external_subject_id: r.try_get("external_subject_id")?,
        email: r.try_get("email")?,
        email_verified: r.try_get("email_verified")?,
        display_name: r.try_get("display_name")?,
        pii_encrypted_blob: r.try_get("pii_encrypted_blob")?,
        created_at: millis_to_datetime(r.try_get("created_at")?, "created_at")?,
        updated_at: millis_to_datetime(r.try_get("updated_at")?, "updated_at")?,
        last_login_at: last_login_at
            .map(|ms| millis_to_datetime(ms, "last_login_at"))
            .transpose()?,
        status: UserStatus::from_str(&status).map_err(|e| DbError::decode("users", "status", e))?,
        privacy_level: PrivacyLevel::from_str(&privacy_level)
            .map_err(|e| DbError::decode("users", "privacy_level", e))?,
        consent_version_id: consent_version_id
            .map(|id| Uuid::parse_str(&id))
            .transpose()
            .map_err(|e| DbError::decode("users", "consent_version_id", e))?,
    })
}

fn millis_to_datetime(ms: i64, column: &'static str) -> DbErrorResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms)
        .ok_or_else(|| DbError::decode("users", column, format!("timestamp out of range: {ms}")))
}
