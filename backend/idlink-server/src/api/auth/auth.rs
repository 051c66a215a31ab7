//! Authentication REST API handlers
//!
//! Each handler runs behind [`VerifiedIdentity`], so the body only executes
//! for a caller whose bearer token verified.

use crate::{ApiError, ApiResult, AppState, SignupRequest, VerifiedIdentity};

use idlink_core::PublicUser;

use axum::{Json, body::Bytes, extract::State, http::StatusCode};
use log::info;

/// POST /auth/login
///
/// Find or create the caller's record and stamp the login time.
pub async fn login(
    State(state): State<AppState>,
    VerifiedIdentity(claims): VerifiedIdentity,
) -> ApiResult<Json<PublicUser>> {
    let reconciled = state.identity.login(&claims).await?;

    info!(
        "Login for subject {}: {:?}",
        claims.subject_id, reconciled.action
    );

    Ok(Json(PublicUser::from(&reconciled.user)))
}

/// POST /auth/signup
///
/// Same as login, then applies the optional onboarding fields in the body.
pub async fn signup(
    State(state): State<AppState>,
    VerifiedIdentity(claims): VerifiedIdentity,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<PublicUser>)> {
    let request = SignupRequest::from_body(&body)?.into_onboarding()?;

    let user = state.identity.signup(&claims, &request).await?;

    info!("Signup for subject {} as user {}", claims.subject_id, user.id);

    Ok((StatusCode::CREATED, Json(PublicUser::from(&user))))
}

/// GET /auth/me
///
/// Read-only: never creates or touches the caller's record.
pub async fn me(
    State(state): State<AppState>,
    VerifiedIdentity(claims): VerifiedIdentity,
) -> ApiResult<Json<PublicUser>> {
    let user = state
        .identity
        .find_by_external_subject_id(&claims.subject_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(PublicUser::from(&user)))
}
