pub mod api;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;
pub mod state;
pub mod verifier;

#[cfg(test)]
mod tests;

pub use api::{
    auth::{
        auth::{login, me, signup},
        signup_request::SignupRequest,
    },
    consent::{
        consent::{get_consent_version, list_consent_versions},
        consent_version_list_response::ConsentVersionListResponse,
    },
    error::ApiError,
    error::Result as ApiResult,
    extractors::verified_identity::VerifiedIdentity,
};

pub use crate::routes::build_router;
pub use crate::state::AppState;
pub use crate::verifier::build_verifier;
