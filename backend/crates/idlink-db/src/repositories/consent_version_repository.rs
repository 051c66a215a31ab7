//! Consent version log.
//!
//! Versions are only ever inserted, toggled active/inactive, or deleted.
//! There is deliberately no operation that rewrites `content`; the schema
//! trigger rejects such updates as well.

use crate::{DbError, Result as DbErrorResult};

use idlink_core::{ConsentVersion, ErrorLocation};

use std::panic::Location;

use chrono::DateTime;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use uuid::Uuid;

pub struct ConsentVersionRepository;

impl ConsentVersionRepository {
    /// Append a newly published version
    pub async fn publish<'e, E>(executor: E, version: &ConsentVersion) -> DbErrorResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        sqlx::query(
            r#"
                INSERT INTO consent_versions (id, version, content, is_active, created_at)
                VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(version.id.to_string())
        .bind(&version.version)
        .bind(&version.content)
        .bind(version.is_active)
        .bind(version.created_at.timestamp_millis())
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> DbErrorResult<Option<ConsentVersion>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let row = sqlx::query(
            r#"
                SELECT id, version, content, is_active, created_at
                FROM consent_versions
                WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(executor)
        .await?;

        row.as_ref().map(consent_version_from_row).transpose()
    }

    pub async fn find_by_version<'e, E>(
        executor: E,
        version: &str,
    ) -> DbErrorResult<Option<ConsentVersion>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let row = sqlx::query(
            r#"
                SELECT id, version, content, is_active, created_at
                FROM consent_versions
                WHERE version = ?
            "#,
        )
        .bind(version)
        .fetch_optional(executor)
        .await?;

        row.as_ref().map(consent_version_from_row).transpose()
    }

    /// Versions new signups may reference, newest first
    pub async fn find_active<'e, E>(executor: E) -> DbErrorResult<Vec<ConsentVersion>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let rows = sqlx::query(
            r#"
                SELECT id, version, content, is_active, created_at
                FROM consent_versions
                WHERE is_active = 1
                ORDER BY created_at DESC, version DESC
            "#,
        )
        .fetch_all(executor)
        .await?;

        rows.iter()
            .map(consent_version_from_row)
            .collect::<DbErrorResult<Vec<_>>>()
    }

    /// Full history, newest first
    pub async fn find_all<'e, E>(executor: E) -> DbErrorResult<Vec<ConsentVersion>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let rows = sqlx::query(
            r#"
                SELECT id, version, content, is_active, created_at
                FROM consent_versions
                ORDER BY created_at DESC, version DESC
            "#,
        )
        .fetch_all(executor)
        .await?;

        rows.iter()
            .map(consent_version_from_row)
            .collect::<DbErrorResult<Vec<_>>>()
    }

    /// Flip the only mutable flag of a version
    pub async fn set_active<'e, E>(executor: E, id: Uuid, is_active: bool) -> DbErrorResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let result = sqlx::query("UPDATE consent_versions SET is_active = ? WHERE id = ?")
            .bind(is_active)
            .bind(id.to_string())
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                entity: "ConsentVersion",
                key: id.to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }

    /// Remove a version. Users referencing it have their reference cleared.
    pub async fn delete<'e, E>(executor: E, id: Uuid) -> DbErrorResult<bool>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let result = sqlx::query("DELETE FROM consent_versions WHERE id = ?")
            .bind(id.to_string())
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn consent_version_from_row(r: &SqliteRow) -> DbErrorResult<ConsentVersion> {
    let id: String = r.try_get("id")?;
    let created_at: i64 = r.try_get("created_at")?;

    Ok(ConsentVersion {
        id: Uuid::parse_str(&id).map_err(|e| DbError::decode("consent_versions", "id", e))?,
        version: r.try_get("version")?,
        content: r.try_get("content")?,
        is_active: r.try_get("is_active")?,
        created_at: DateTime::from_timestamp_millis(created_at).ok_or_else(|| {
            DbError::decode(
                "consent_versions",
                "created_at",
                format!("timestamp out of range: {created_at}"),
            )
        })?,
    })
}
