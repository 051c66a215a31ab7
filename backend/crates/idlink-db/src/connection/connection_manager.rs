use crate::{DatabaseOptions, DbError, Result};

use idlink_core::ErrorLocation;

use std::panic::Location;

use log::{LevelFilter, info};
use sqlx::ConnectOptions;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};

/// Opens the identity store and brings its schema up to date.
pub struct ConnectionManager {
    options: DatabaseOptions,
}

impl ConnectionManager {
    pub fn new(options: DatabaseOptions) -> Self {
        Self { options }
    }

    /// Create the pool, enabling WAL and foreign keys, then run migrations.
    pub async fn connect(&self) -> Result<SqlitePool> {
        let db_path = &self.options.path;

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| DbError::Initialization {
                    message: format!(
                        "Failed to create database directory {}: {}",
                        parent.display(),
                        e
                    ),
                    location: ErrorLocation::from(Location::caller()),
                })?;
        }

        let statement_level = if self.options.log_statements {
            LevelFilter::Debug
        } else {
            LevelFilter::Off
        };

        let connect_options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(self.options.busy_timeout)
            .log_statements(statement_level);

        let pool = SqlitePoolOptions::new()
            .max_connections(self.options.max_connections)
            .connect_with(connect_options)
            .await?;

        info!(
            "Database opened: {} (max {} connections)",
            db_path.display(),
            self.options.max_connections
        );

        Self::migrate(&pool).await?;

        Ok(pool)
    }

    /// Apply the embedded schema migrations
    pub async fn migrate(pool: &SqlitePool) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(pool)
            .await
            .map_err(|e| DbError::Migration {
                message: format!("Migration failed: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(())
    }

    /// Cheap round trip used by readiness probes
    pub async fn ping(pool: &SqlitePool) -> Result<()> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }
}
