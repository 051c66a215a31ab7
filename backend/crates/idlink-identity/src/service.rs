use crate::onboarding::{ensure_consent_acceptable, validate_request};
use crate::{
    OnboardingLimits, OnboardingRequest, ReconcileOptions, Reconciliation,
    Result as IdentityErrorResult, apply_onboarding, reconcile_user,
};

use idlink_core::{ConsentVersion, User, VerifiedClaims};
use idlink_db::{ConsentVersionRepository, UserRepository};

use sqlx::SqlitePool;
use uuid::Uuid;

/// Identity flows bound to a connection pool.
///
/// Each call acquires at most one pooled connection and holds it until the
/// call returns; the connection goes back to the pool when dropped, on success
/// and on every error path alike.
#[derive(Clone)]
pub struct IdentityService {
    pool: SqlitePool,
    options: ReconcileOptions,
    limits: OnboardingLimits,
}

impl IdentityService {
    pub fn new(pool: SqlitePool, options: ReconcileOptions, limits: OnboardingLimits) -> Self {
        Self {
            pool,
            options,
            limits,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn options(&self) -> &ReconcileOptions {
        &self.options
    }

    pub fn limits(&self) -> &OnboardingLimits {
        &self.limits
    }

    /// Reconcile the caller's record.
    pub async fn login(&self, claims: &VerifiedClaims) -> IdentityErrorResult<Reconciliation> {
        let mut conn = self.pool.acquire().await?;

        reconcile_user(&mut conn, claims, &self.options).await
    }

    /// Reconcile the caller's record, then apply the onboarding fields.
    ///
    /// A request that fails validation, or names a consent version the caller
    /// does not already hold and that is unknown or retired, is rejected
    /// before anything is written.
    pub async fn signup(
        &self,
        claims: &VerifiedClaims,
        request: &OnboardingRequest,
    ) -> IdentityErrorResult<User> {
        validate_request(request, &self.limits)?;

        let mut conn = self.pool.acquire().await?;

        if let Some(id) = request.consent_version_id {
            let current =
                UserRepository::find_by_external_subject_id(&mut *conn, &claims.subject_id)
                    .await?
                    .and_then(|user| user.consent_version_id);
            if current != Some(id) {
                ensure_consent_acceptable(&mut conn, id).await?;
            }
        }

        let reconciled = reconcile_user(&mut conn, claims, &self.options).await?;

        apply_onboarding(&mut conn, reconciled.user, request, &self.limits).await
    }

    pub async fn find_by_external_subject_id(
        &self,
        external_subject_id: &str,
    ) -> IdentityErrorResult<Option<User>> {
        Ok(UserRepository::find_by_external_subject_id(&self.pool, external_subject_id).await?)
    }

    pub async fn find_by_id(&self, id: Uuid) -> IdentityErrorResult<Option<User>> {
        Ok(UserRepository::find_by_id(&self.pool, id).await?)
    }

    pub async fn list_active_consent_versions(&self) -> IdentityErrorResult<Vec<ConsentVersion>> {
        Ok(ConsentVersionRepository::find_active(&self.pool).await?)
    }

    pub async fn find_consent_version(
        &self,
        id: Uuid,
    ) -> IdentityErrorResult<Option<ConsentVersion>> {
        Ok(ConsentVersionRepository::find_by_id(&self.pool, id).await?)
    }
}
