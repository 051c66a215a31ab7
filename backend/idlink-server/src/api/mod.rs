pub mod auth;
pub mod consent;
pub mod error;
pub mod extractors;
