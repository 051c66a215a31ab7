use crate::error::{Result as ServerErrorResult, ServerError};

use idlink_auth::{AuthError, JwtTokenVerifier, RemoteTokenVerifier, TokenVerifier};
use idlink_config::{AuthConfig, AuthProvider};
use idlink_core::ErrorLocation;

use std::panic::Location;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use log::info;

/// Build the token verifier selected by `[auth] provider`.
///
/// `public_key_path` is the resolved RS256 key location, if one is configured.
pub fn build_verifier(
    auth: &AuthConfig,
    public_key_path: Option<&Path>,
) -> ServerErrorResult<Arc<dyn TokenVerifier>> {
    match auth.provider {
        AuthProvider::Jwt => Ok(Arc::new(build_jwt_verifier(auth, public_key_path)?)),
        AuthProvider::Remote => {
            let url = auth.remote_verify_url.as_deref().ok_or_else(|| {
                missing_setting("remote_verify_url is required for the remote provider")
            })?;
            let verifier = RemoteTokenVerifier::new(
                url,
                auth.remote_api_key.as_deref(),
                Duration::from_secs(auth.remote_timeout_secs),
            )?;
            info!("Token verification: remote provider at {}", url);
            Ok(Arc::new(verifier))
        }
    }
}

fn build_jwt_verifier(
    auth: &AuthConfig,
    public_key_path: Option<&Path>,
) -> ServerErrorResult<JwtTokenVerifier> {
    let mut verifier = if let Some(ref secret) = auth.jwt_secret {
        info!("Token verification: JWT HS256");
        JwtTokenVerifier::with_hs256(secret.as_bytes())
    } else if let Some(path) = public_key_path {
        let public_key =
            std::fs::read_to_string(path).map_err(|e| ServerError::JwtKeyFile {
                path: path.display().to_string(),
                source: e,
            })?;
        info!("Token verification: JWT RS256 ({})", path.display());
        JwtTokenVerifier::with_rs256(&public_key)?
    } else {
        return Err(missing_setting(
            "jwt_secret or jwt_public_key_path is required for the jwt provider",
        ));
    };

    if let Some(ref issuer) = auth.issuer {
        verifier = verifier.with_issuer(issuer);
    }
    if let Some(ref audience) = auth.audience {
        verifier = verifier.with_audience(audience);
    }

    Ok(verifier.with_leeway(auth.leeway_secs))
}

#[track_caller]
fn missing_setting(message: &str) -> ServerError {
    ServerError::Auth(AuthError::InvalidKey {
        message: message.to_string(),
        location: ErrorLocation::from(Location::caller()),
    })
}
