use crate::{AuthError, Result as AuthErrorResult};

use idlink_core::VerifiedClaims;

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Longest subject id accepted from a provider
pub const MAX_SUBJECT_LENGTH: usize = 128;

/// Payload of a provider-issued ID token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Provider subject (stable user id)
    pub sub: String,
    /// Expiration timestamp (Unix)
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Some providers send `displayName` instead of `name`
    #[serde(
        default,
        rename = "displayName",
        skip_serializing_if = "Option::is_none"
    )]
    pub display_name: Option<String>,
}

impl TokenClaims {
    /// Validate claims after signature verification
    #[track_caller]
    pub fn validate(&self) -> AuthErrorResult<()> {
        if self.sub.trim().is_empty() {
            return Err(AuthError::InvalidClaim {
                claim: "sub".to_string(),
                message: "sub cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        if self.sub.chars().count() > MAX_SUBJECT_LENGTH {
            return Err(AuthError::InvalidClaim {
                claim: "sub".to_string(),
                message: "sub exceeds maximum length".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }

    /// `name` wins over `displayName`; an empty `name` falls through.
    pub fn into_verified(self) -> VerifiedClaims {
        let display_name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .or(self.display_name);

        VerifiedClaims::new(self.sub, self.email, self.email_verified, display_name)
    }
}
