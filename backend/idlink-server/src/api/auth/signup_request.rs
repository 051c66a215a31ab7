use crate::{ApiError, ApiResult};

use idlink_core::PrivacyLevel;
use idlink_identity::OnboardingRequest;

use std::str::FromStr;

use serde::Deserialize;
use uuid::Uuid;

/// Optional onboarding fields accepted by `POST /auth/signup`.
///
/// Field names are snake_case; the camelCase spellings are accepted as aliases.
#[derive(Debug, Default, Deserialize)]
pub struct SignupRequest {
    #[serde(default, alias = "displayName")]
    pub display_name: Option<String>,
    #[serde(default, alias = "privacyLevel")]
    pub privacy_level: Option<String>,
    #[serde(default, alias = "consentVersionId")]
    pub consent_version_id: Option<String>,
}

impl SignupRequest {
    /// Parse a raw request body. An empty body carries no onboarding fields.
    pub fn from_body(body: &[u8]) -> ApiResult<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        serde_json::from_slice(body)
            .map_err(|e| ApiError::validation(format!("Invalid request body: {e}"), None))
    }

    pub fn into_onboarding(self) -> ApiResult<OnboardingRequest> {
        let privacy_level = self
            .privacy_level
            .as_deref()
            .map(PrivacyLevel::from_str)
            .transpose()
            .map_err(|_| {
                ApiError::validation(
                    "privacy_level must be one of: default, strict, custom",
                    Some("privacy_level"),
                )
            })?;

        let consent_version_id = self
            .consent_version_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(Uuid::parse_str)
            .transpose()
            .map_err(|_| {
                ApiError::validation(
                    "consent_version_id must be a UUID",
                    Some("consent_version_id"),
                )
            })?;

        Ok(OnboardingRequest {
            display_name: self.display_name,
            privacy_level,
            consent_version_id,
        })
    }
}
