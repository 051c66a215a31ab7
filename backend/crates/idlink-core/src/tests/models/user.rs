use crate::{PrivacyLevel, User, UserStatus, VerifiedClaims};

use googletest::prelude::*;

fn claims() -> VerifiedClaims {
    VerifiedClaims::new(
        "abc123",
        Some("u@example.com".to_string()),
        true,
        Some("Ada".to_string()),
    )
}

#[test]
fn given_full_claims_when_building_user_then_fields_are_mirrored() {
    let user = User::from_claims(&claims(), PrivacyLevel::Strict, true);

    assert_that!(user.external_subject_id, eq("abc123"));
    assert_that!(user.email, eq("u@example.com"));
    assert_that!(user.email_verified, eq(true));
    assert_that!(user.display_name, some(eq("Ada")));
    assert_that!(user.status, eq(UserStatus::Active));
    assert_that!(user.privacy_level, eq(PrivacyLevel::Strict));
    assert_that!(user.consent_version_id, none());
    assert_that!(user.pii_encrypted_blob, none());
    assert_that!(user.created_at, eq(user.updated_at));
    assert_that!(user.last_login_at, some(eq(user.created_at)));
}

#[test]
fn given_claims_without_email_when_building_user_then_email_is_empty() {
    let claims = VerifiedClaims::new("abc123", None, false, None);

    let user = User::from_claims(&claims, PrivacyLevel::Default, true);

    assert_that!(user.email, eq(""));
    assert_that!(user.display_name, none());
    assert_that!(user.email_verified, eq(false));
}

#[test]
fn given_no_login_flag_when_building_user_then_last_login_is_unset() {
    let user = User::from_claims(&claims(), PrivacyLevel::Default, false);

    assert_that!(user.last_login_at, none());
}

#[test]
fn given_two_users_when_built_then_ids_differ() {
    let a = User::from_claims(&claims(), PrivacyLevel::Default, true);
    let b = User::from_claims(&claims(), PrivacyLevel::Default, true);

    assert_that!(a.id, not(eq(b.id)));
}

#[test]
fn given_built_user_then_timestamps_have_millisecond_precision() {
    let user = User::from_claims(&claims(), PrivacyLevel::Default, true);

    assert_that!(user.created_at.timestamp_subsec_nanos() % 1_000_000, eq(0));
}
