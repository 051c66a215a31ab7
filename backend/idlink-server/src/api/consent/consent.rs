//! Consent version REST API handlers
//!
//! Public, read-only view of the published consent log.

use crate::{ApiError, ApiResult, AppState, ConsentVersionListResponse};

use idlink_core::PublicConsentVersion;

use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

/// GET /consent/versions
///
/// List versions new signups may accept
pub async fn list_consent_versions(
    State(state): State<AppState>,
) -> ApiResult<Json<ConsentVersionListResponse>> {
    let versions = state.identity.list_active_consent_versions().await?;

    Ok(Json(ConsentVersionListResponse {
        consent_versions: versions.iter().map(PublicConsentVersion::from).collect(),
    }))
}

/// GET /consent/versions/:id
pub async fn get_consent_version(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<PublicConsentVersion>> {
    let version_id = Uuid::parse_str(&id)
        .map_err(|_| ApiError::validation(format!("Invalid consent version id: {id}"), Some("id")))?;

    let version = state
        .identity
        .find_consent_version(version_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Consent version {} not found", id)))?;

    Ok(Json(PublicConsentVersion::from(&version)))
}
