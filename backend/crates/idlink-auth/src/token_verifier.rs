use crate::Result as AuthErrorResult;

use idlink_core::VerifiedClaims;

use async_trait::async_trait;

/// Converts an opaque bearer credential into trusted claims.
///
/// Implementations touch no local state. Every failure is an
/// [`AuthError`](crate::AuthError); callers collapse them into a single
/// unauthenticated response.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> AuthErrorResult<VerifiedClaims>;

    /// Short name for logs
    fn name(&self) -> &'static str;
}
