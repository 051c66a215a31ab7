#![allow(dead_code)]

use idlink_core::{ConsentVersion, VerifiedClaims};
use idlink_db::{ConnectionManager, ConsentVersionRepository, DatabaseOptions};
use idlink_identity::{IdentityService, OnboardingLimits, ReconcileOptions};

use std::path::Path;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Creates an in-memory SQLite pool with migrations run
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1) // In-memory needs single connection
        .connect_with(options)
        .await
        .expect("Failed to create test pool");

    ConnectionManager::migrate(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Creates a file-backed pool that allows real concurrent writers
pub async fn create_file_pool(dir: &Path, max_connections: u32) -> SqlitePool {
    let options =
        DatabaseOptions::new(dir.join("identity.db")).with_max_connections(max_connections);

    ConnectionManager::new(options)
        .connect()
        .await
        .expect("Failed to create file pool")
}

pub fn create_service(pool: SqlitePool) -> IdentityService {
    IdentityService::new(pool, ReconcileOptions::default(), OnboardingLimits::default())
}

pub fn claims(subject_id: &str, email: Option<&str>, verified: bool, name: Option<&str>) -> VerifiedClaims {
    VerifiedClaims::new(
        subject_id,
        email.map(str::to_string),
        verified,
        name.map(str::to_string),
    )
}

pub async fn publish_consent(pool: &SqlitePool, label: &str, active: bool) -> ConsentVersion {
    let mut version = ConsentVersion::new(label, format!("Consent policy {label}"));
    version.is_active = active;
    ConsentVersionRepository::publish(pool, &version)
        .await
        .expect("Failed to publish consent version");
    version
}

/// Move a stored user's timestamps into the past so the next write is observable.
pub async fn backdate_user(pool: &SqlitePool, subject_id: &str) {
    let day_ago = (idlink_core::utc_now() - chrono::Duration::days(1)).timestamp_millis();
    sqlx::query(
        "UPDATE users SET created_at = ?, updated_at = ?, last_login_at = ? WHERE external_subject_id = ?",
    )
    .bind(day_ago)
    .bind(day_ago)
    .bind(day_ago)
    .bind(subject_id)
    .execute(pool)
    .await
    .expect("Failed to backdate user");
}
