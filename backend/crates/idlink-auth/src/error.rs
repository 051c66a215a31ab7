use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Missing authorization header {location}")]
    MissingHeader { location: ErrorLocation },

    #[error("Invalid authorization scheme: expected 'Bearer' {location}")]
    InvalidScheme { location: ErrorLocation },

    #[error("Empty bearer token {location}")]
    EmptyToken { location: ErrorLocation },

    #[error("Token expired {location}")]
    TokenExpired { location: ErrorLocation },

    #[error("JWT decode failed: {source} {location}")]
    JwtDecode {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },

    #[error("Invalid claim '{claim}': {message} {location}")]
    InvalidClaim {
        claim: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid verification key: {message} {location}")]
    InvalidKey {
        message: String,
        location: ErrorLocation,
    },

    #[error("Identity provider rejected the token with status {status} {location}")]
    ProviderRejected { status: u16, location: ErrorLocation },

    #[error("Identity provider unreachable: {source} {location}")]
    ProviderUnavailable {
        #[source]
        source: reqwest::Error,
        location: ErrorLocation,
    },

    #[error("Unexpected identity provider response: {message} {location}")]
    ProviderResponse {
        message: String,
        location: ErrorLocation,
    },
}

impl AuthError {
    /// True when the request carried no usable bearer credential at all,
    /// as opposed to one that failed verification.
    pub fn is_missing_credential(&self) -> bool {
        matches!(
            self,
            Self::MissingHeader { .. } | Self::InvalidScheme { .. } | Self::EmptyToken { .. }
        )
    }

    /// Stable code for server-side logs
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingHeader { .. } => "MISSING_AUTH_HEADER",
            Self::InvalidScheme { .. } => "INVALID_AUTH_SCHEME",
            Self::EmptyToken { .. } => "EMPTY_TOKEN",
            Self::TokenExpired { .. } => "TOKEN_EXPIRED",
            Self::JwtDecode { .. } => "JWT_DECODE_FAILED",
            Self::InvalidClaim { .. } => "INVALID_CLAIM",
            Self::InvalidKey { .. } => "INVALID_KEY",
            Self::ProviderRejected { .. } => "PROVIDER_REJECTED",
            Self::ProviderUnavailable { .. } => "PROVIDER_UNAVAILABLE",
            Self::ProviderResponse { .. } => "PROVIDER_RESPONSE",
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
