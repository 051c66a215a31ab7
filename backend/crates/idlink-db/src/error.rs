use idlink_core::ErrorLocation;

use std::panic::Location;

use sqlx::error::ErrorKind;
use thiserror::Error;

/// Column named by SQLite in the unique-violation message for a duplicate subject.
const SUBJECT_ID_CONSTRAINT: &str = "users.external_subject_id";

#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLx error: {source} {location}")]
    Sqlx {
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Migration error: {message} {location}")]
    Migration {
        message: String,
        location: ErrorLocation,
    },

    #[error("Database initialization failed: {message} {location}")]
    Initialization {
        message: String,
        location: ErrorLocation,
    },

    #[error("Corrupt row in {table}.{column}: {message} {location}")]
    RowDecode {
        table: &'static str,
        column: &'static str,
        message: String,
        location: ErrorLocation,
    },

    #[error("{entity} not found: {key} {location}")]
    NotFound {
        entity: &'static str,
        key: String,
        location: ErrorLocation,
    },
}

impl From<sqlx::Error> for DbError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        Self::Sqlx {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl DbError {
    #[track_caller]
    pub(crate) fn decode(table: &'static str, column: &'static str, message: impl ToString) -> Self {
        Self::RowDecode {
            table,
            column,
            message: message.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Returns `true` only when `err` is a unique violation on the user subject id.
///
/// Primary-key collisions, foreign-key failures and every other database error
/// return `false` and must be propagated by the caller.
pub fn is_subject_id_conflict(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            matches!(db_err.kind(), ErrorKind::UniqueViolation)
                && db_err.message().contains(SUBJECT_ID_CONSTRAINT)
        }
        _ => false,
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
