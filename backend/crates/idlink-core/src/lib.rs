pub mod clock;
pub mod error;
pub mod models;

pub use clock::utc_now;
pub use error::{CoreError, Result};
pub use error_location::ErrorLocation;
pub use models::consent_version::ConsentVersion;
pub use models::privacy_level::PrivacyLevel;
pub use models::public_consent_version::PublicConsentVersion;
pub use models::public_user::PublicUser;
pub use models::user::User;
pub use models::user_status::UserStatus;
pub use models::verified_claims::VerifiedClaims;

#[cfg(test)]
mod tests;
