use idlink_db::{ConnectionManager, DatabaseOptions};

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

/// Creates a file-backed pool with several connections, for tests that need
/// real concurrent writers.
pub async fn create_file_pool(dir: &Path, max_connections: u32) -> SqlitePool {
    let options =
        DatabaseOptions::new(dir.join("identity.db")).with_max_connections(max_connections);

    ConnectionManager::new(options)
        .connect()
        .await
        .expect("Failed to create file pool")
}
