use idlink_core::{ConsentVersion, PrivacyLevel, User, VerifiedClaims};

use chrono::Duration;

/// Claims for a fully populated provider token
pub fn test_claims(subject_id: &str) -> VerifiedClaims {
    VerifiedClaims::new(
        subject_id,
        Some(format!("{subject_id}@example.com")),
        true,
        Some("Test User".to_string()),
    )
}

/// A user whose timestamps lie one day in the past, so later writes are
/// guaranteed to move `updated_at` forward.
pub fn test_user(subject_id: &str) -> User {
    let mut user = User::from_claims(&test_claims(subject_id), PrivacyLevel::Default, true);
    let yesterday = user.created_at - Duration::days(1);
    user.created_at = yesterday;
    user.updated_at = yesterday;
    user.last_login_at = Some(yesterday);
    user
}

pub fn test_consent_version(label: &str) -> ConsentVersion {
    let mut version = ConsentVersion::new(label, format!("Consent policy {label}"));
    version.created_at = idlink_core::utc_now() - Duration::minutes(5);
    version
}

