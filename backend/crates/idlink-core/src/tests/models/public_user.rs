use crate::{ConsentVersion, PrivacyLevel, User, VerifiedClaims};

use chrono::DateTime;
use googletest::prelude::*;
use uuid::Uuid;

fn user_with_secret() -> User {
    let claims = VerifiedClaims::new("abc123", Some("u@example.com".to_string()), true, None);
    let mut user = User::from_claims(&claims, PrivacyLevel::Custom, false);
    user.pii_encrypted_blob = Some(b"top-secret-envelope".to_vec());
    user
}

#[test]
fn given_user_when_projected_then_all_public_fields_are_present() {
    let mut user = user_with_secret();
    let consent_id = Uuid::new_v4();
    user.consent_version_id = Some(consent_id);

    let json = serde_json::to_value(user.public_view()).unwrap();

    assert_that!(json["id"].as_str(), some(eq(user.id.to_string())));
    assert_that!(json["external_subject_id"].as_str(), some(eq("abc123")));
    assert_that!(json["email"].as_str(), some(eq("u@example.com")));
    assert_that!(json["email_verified"].as_bool(), some(eq(true)));
    assert_that!(json["display_name"].is_null(), eq(true));
    assert_that!(json["status"].as_str(), some(eq("active")));
    assert_that!(json["privacy_level"].as_str(), some(eq("custom")));
    assert_that!(
        json["consent_version_id"].as_str(),
        some(eq(consent_id.to_string()))
    );
    assert_that!(json["last_login_at"].is_null(), eq(true));
}

#[test]
fn given_user_with_pii_blob_when_projected_then_blob_never_appears() {
    let user = user_with_secret();

    let rendered = serde_json::to_string(&user.public_view()).unwrap();

    assert_that!(rendered, not(contains_substring("pii")));
    assert_that!(rendered, not(contains_substring("top-secret-envelope")));
    // byte array rendering of the blob's first bytes: [116,111,112,...]
    assert_that!(rendered, not(contains_substring("116,111,112")));
}

#[test]
fn given_user_when_projected_then_timestamps_round_trip() {
    let user = user_with_secret();

    let public = user.public_view();
    let created_at = public.created_at.unwrap();
    let parsed = DateTime::parse_from_rfc3339(&created_at).unwrap();

    assert_that!(parsed.timestamp_millis(), eq(user.created_at.timestamp_millis()));
}

#[test]
fn given_consent_version_when_projected_then_content_and_flags_are_included() {
    let version = ConsentVersion::new("2024-01", "We store your email.");

    let json = serde_json::to_value(version.public_view()).unwrap();

    assert_that!(json["version"].as_str(), some(eq("2024-01")));
    assert_that!(json["content"].as_str(), some(eq("We store your email.")));
    assert_that!(json["is_active"].as_bool(), some(eq(true)));
    assert_that!(json["id"].as_str(), some(eq(version.id.to_string())));
}
