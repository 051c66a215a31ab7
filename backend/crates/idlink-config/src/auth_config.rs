use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_JWT_LEEWAY_SECS, DEFAULT_REMOTE_TIMEOUT_SECS,
    MAX_REMOTE_TIMEOUT_SECS, MIN_JWT_SECRET_LENGTH, MIN_REMOTE_TIMEOUT_SECS,
};

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

/// Where bearer tokens get verified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    /// Locally, from a shared secret or the provider's public key
    #[default]
    Jwt,
    /// By calling the provider's verification endpoint
    Remote,
}

impl FromStr for AuthProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "jwt" => Ok(Self::Jwt),
            "remote" => Ok(Self::Remote),
            other => Err(format!("unknown auth provider '{other}'")),
        }
    }
}

impl fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jwt => f.write_str("jwt"),
            Self::Remote => f.write_str("remote"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub provider: AuthProvider,

    /// HS256 shared secret
    pub jwt_secret: Option<String>,
    /// RS256 public key (PEM), relative to the config directory
    pub jwt_public_key_path: Option<String>,
    pub issuer: Option<String>,
    pub audience: Option<String>,
    /// Clock skew tolerance for `exp`/`nbf`
    pub leeway_secs: u64,

    pub remote_verify_url: Option<String>,
    pub remote_api_key: Option<String>,
    pub remote_timeout_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            provider: AuthProvider::default(),
            jwt_secret: None,
            jwt_public_key_path: None,
            issuer: None,
            audience: None,
            leeway_secs: DEFAULT_JWT_LEEWAY_SECS,
            remote_verify_url: None,
            remote_api_key: None,
            remote_timeout_secs: DEFAULT_REMOTE_TIMEOUT_SECS,
        }
    }
}

impl AuthConfig {
    pub fn validate(&self, config_dir: &Path) -> ConfigErrorResult<()> {
        match self.provider {
            AuthProvider::Jwt => self.validate_jwt(config_dir),
            AuthProvider::Remote => self.validate_remote(),
        }
    }

    fn validate_jwt(&self, config_dir: &Path) -> ConfigErrorResult<()> {
        match (&self.jwt_secret, &self.jwt_public_key_path) {
            (None, None) => Err(ConfigError::auth(
                "auth.provider = jwt requires jwt_secret or jwt_public_key_path",
            )),
            (Some(_), Some(_)) => Err(ConfigError::auth(
                "Set only one of jwt_secret or jwt_public_key_path",
            )),
            (Some(secret), None) => {
                if secret.len() < MIN_JWT_SECRET_LENGTH {
                    return Err(ConfigError::auth(format!(
                        "jwt_secret must be at least {MIN_JWT_SECRET_LENGTH} characters"
                    )));
                }
                Ok(())
            }
            (None, Some(key_path)) => {
                if Path::new(key_path).is_absolute() || key_path.contains("..") {
                    return Err(ConfigError::auth(
                        "jwt_public_key_path must be relative and cannot contain '..'",
                    ));
                }
                let full_path = config_dir.join(key_path);
                if !full_path.exists() {
                    return Err(ConfigError::auth(format!(
                        "JWT public key not found: {}",
                        full_path.display()
                    )));
                }
                Ok(())
            }
        }
    }

    fn validate_remote(&self) -> ConfigErrorResult<()> {
        let url = self
            .remote_verify_url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| {
                ConfigError::auth("auth.provider = remote requires remote_verify_url")
            })?;

        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::auth(format!(
                "remote_verify_url must be an http(s) URL, got '{url}'"
            )));
        }

        if !(MIN_REMOTE_TIMEOUT_SECS..=MAX_REMOTE_TIMEOUT_SECS).contains(&self.remote_timeout_secs)
        {
            return Err(ConfigError::auth(format!(
                "remote_timeout_secs must be {}-{}, got {}",
                MIN_REMOTE_TIMEOUT_SECS, MAX_REMOTE_TIMEOUT_SECS, self.remote_timeout_secs
            )));
        }

        Ok(())
    }

    /// Short description of the verification mode for logs (no secrets)
    pub fn describe(&self) -> String {
        match self.provider {
            AuthProvider::Jwt if self.jwt_secret.is_some() => "jwt (HS256)".to_string(),
            AuthProvider::Jwt if self.jwt_public_key_path.is_some() => "jwt (RS256)".to_string(),
            AuthProvider::Jwt => "jwt (unconfigured)".to_string(),
            AuthProvider::Remote => format!(
                "remote ({})",
                self.remote_verify_url.as_deref().unwrap_or("unset")
            ),
        }
    }
}
