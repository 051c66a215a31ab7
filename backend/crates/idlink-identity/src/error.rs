use idlink_core::ErrorLocation;
use idlink_db::DbError;

use std::panic::Location;

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("Database error: {source} {location}")]
    Db {
        source: DbError,
        location: ErrorLocation,
    },

    #[error("Invalid {field}: {message} {location}")]
    Validation {
        field: &'static str,
        message: String,
        location: ErrorLocation,
    },

    #[error("Consent version {id} does not exist {location}")]
    ConsentVersionNotFound { id: Uuid, location: ErrorLocation },

    #[error("Consent version {id} is no longer accepted {location}")]
    ConsentVersionInactive { id: Uuid, location: ErrorLocation },
}

impl From<DbError> for IdentityError {
    #[track_caller]
    fn from(source: DbError) -> Self {
        Self::Db {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<sqlx::Error> for IdentityError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        Self::Db {
            source: DbError::from(source),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl IdentityError {
    #[track_caller]
    pub(crate) fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub(crate) fn consent_not_found(id: Uuid) -> Self {
        Self::ConsentVersionNotFound {
            id,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub(crate) fn consent_inactive(id: Uuid) -> Self {
        Self::ConsentVersionInactive {
            id,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// A row that was just written or observed could not be read back.
    #[track_caller]
    pub(crate) fn vanished(key: impl ToString) -> Self {
        Self::Db {
            source: DbError::NotFound {
                entity: "User",
                key: key.to_string(),
                location: ErrorLocation::from(Location::caller()),
            },
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, IdentityError>;
