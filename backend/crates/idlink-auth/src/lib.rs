//! Turns bearer credentials into [`VerifiedClaims`](idlink_core::VerifiedClaims).
//!
//! Every verifier implements [`TokenVerifier`], so the HTTP layer never knows
//! whether tokens are checked locally ([`JwtTokenVerifier`]) or by calling the
//! identity provider ([`RemoteTokenVerifier`]).

pub mod bearer;
pub mod error;
pub mod jwt_algorithm;
pub mod jwt_token_verifier;
pub mod remote_token_verifier;
pub mod token_claims;
pub mod token_verifier;

pub use bearer::extract_bearer_token;
pub use error::{AuthError, Result};
pub use jwt_algorithm::JwtAlgorithm;
pub use jwt_token_verifier::JwtTokenVerifier;
pub use remote_token_verifier::RemoteTokenVerifier;
pub use token_claims::TokenClaims;
pub use token_verifier::TokenVerifier;
