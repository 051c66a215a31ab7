pub mod consent_version_repository;
pub mod insert_outcome;
pub mod user_repository;
