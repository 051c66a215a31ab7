//! Verification by asking the identity provider's lookup endpoint.
//!
//! The provider receives `{"idToken": "<token>"}` and answers with the
//! accounts the token belongs to:
//! `{"users": [{"localId", "email", "emailVerified", "displayName"}]}`.

use crate::token_claims::MAX_SUBJECT_LENGTH;
use crate::{AuthError, Result as AuthErrorResult, TokenVerifier};

use idlink_core::VerifiedClaims;

use std::panic::Location;
use std::time::Duration;

use async_trait::async_trait;
use error_location::ErrorLocation;
use log::debug;
use reqwest::{Client as ReqwestClient, Url};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupRequest<'a> {
    id_token: &'a str,
}

#[derive(Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<ProviderUser>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProviderUser {
    local_id: String,
    email: Option<String>,
    #[serde(default)]
    email_verified: bool,
    display_name: Option<String>,
}

pub struct RemoteTokenVerifier {
    client: ReqwestClient,
    verify_url: Url,
}

impl RemoteTokenVerifier {
    /// `api_key`, when given, is sent as the `key` query parameter.
    #[track_caller]
    pub fn new(verify_url: &str, api_key: Option<&str>, timeout: Duration) -> AuthErrorResult<Self> {
        let mut verify_url = Url::parse(verify_url).map_err(|e| AuthError::InvalidKey {
            message: format!("Invalid verification URL '{verify_url}': {e}"),
            location: ErrorLocation::from(Location::caller()),
        })?;
        if let Some(key) = api_key {
            verify_url.query_pairs_mut().append_pair("key", key);
        }

        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| AuthError::ProviderUnavailable {
                source,
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(Self { client, verify_url })
    }

    async fn lookup(&self, token: &str) -> AuthErrorResult<VerifiedClaims> {
        let response = self
            .client
            .post(self.verify_url.clone())
            .json(&LookupRequest { id_token: token })
            .send()
            .await
            .map_err(|source| AuthError::ProviderUnavailable {
                source,
                location: ErrorLocation::from(Location::caller()),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::ProviderRejected {
                status: status.as_u16(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let body: LookupResponse =
            response
                .json()
                .await
                .map_err(|e| AuthError::ProviderResponse {
                    message: e.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                })?;

        let user = body
            .users
            .into_iter()
            .next()
            .ok_or_else(|| AuthError::ProviderResponse {
                message: "no account matches the token".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        if user.local_id.trim().is_empty() {
            return Err(AuthError::InvalidClaim {
                claim: "localId".to_string(),
                message: "localId cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        if user.local_id.chars().count() > MAX_SUBJECT_LENGTH {
            return Err(AuthError::InvalidClaim {
                claim: "localId".to_string(),
                message: "localId exceeds maximum length".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        debug!("Identity provider confirmed subject {}", user.local_id);

        Ok(VerifiedClaims::new(
            user.local_id,
            user.email,
            user.email_verified,
            user.display_name,
        ))
    }
}

#[async_trait]
impl TokenVerifier for RemoteTokenVerifier {
    async fn verify(&self, token: &str) -> AuthErrorResult<VerifiedClaims> {
        self.lookup(token).await
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}
