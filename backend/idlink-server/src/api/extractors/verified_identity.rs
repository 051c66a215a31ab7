//! Axum extractors for REST API authentication

use crate::{ApiError, AppState};

use idlink_auth::extract_bearer_token;
use idlink_core::VerifiedClaims;

use std::future::Future;

use axum::{extract::FromRequestParts, http::request::Parts};

/// Claims of the caller, verified from the `Authorization: Bearer` header.
///
/// Rejects with a 401 before the handler runs when the header is missing or
/// the token fails verification.
pub struct VerifiedIdentity(pub VerifiedClaims);

impl FromRequestParts<AppState> for VerifiedIdentity {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let token = extract_bearer_token(&parts.headers)?;
            let claims = state.verifier.verify(token).await?;

            log::debug!(
                "Verified {} token for subject {}",
                state.verifier.name(),
                claims.subject_id
            );

            Ok(VerifiedIdentity(claims))
        }
    }
}
