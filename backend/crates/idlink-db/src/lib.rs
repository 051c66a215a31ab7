pub mod connection;
pub mod error;
pub mod repositories;

pub use connection::connection_manager::ConnectionManager;
pub use connection::database_options::DatabaseOptions;
pub use error::{DbError, Result, is_subject_id_conflict};
pub use repositories::consent_version_repository::ConsentVersionRepository;
pub use repositories::insert_outcome::InsertOutcome;
pub use repositories::user_repository::UserRepository;
