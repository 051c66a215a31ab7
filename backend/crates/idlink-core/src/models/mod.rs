pub mod consent_version;
pub mod privacy_level;
pub mod public_consent_version;
pub mod public_user;
pub mod user;
pub mod user_status;
pub mod verified_claims;
