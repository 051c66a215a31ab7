use crate::{ApiError, SignupRequest};

use idlink_core::PrivacyLevel;

use googletest::prelude::*;
use uuid::Uuid;

#[test]
fn given_empty_body_then_request_has_no_fields() {
    let request = SignupRequest::from_body(b"").unwrap().into_onboarding().unwrap();

    assert!(request.is_empty());
}

#[test]
fn given_whitespace_body_then_request_has_no_fields() {
    let request = SignupRequest::from_body(b" \n").unwrap();

    assert_that!(request.display_name, none());
}

#[test]
fn given_snake_case_body_then_all_fields_parse() {
    let id = Uuid::new_v4();
    let body = format!(
        r#"{{"display_name":"Ada L.","privacy_level":"strict","consent_version_id":"{id}"}}"#
    );

    let request = SignupRequest::from_body(body.as_bytes())
        .unwrap()
        .into_onboarding()
        .unwrap();

    assert_that!(request.display_name, some(eq("Ada L.")));
    assert_that!(request.privacy_level, some(eq(PrivacyLevel::Strict)));
    assert_that!(request.consent_version_id, some(eq(id)));
}

#[test]
fn given_null_fields_then_they_are_absent() {
    let body = br#"{"display_name":null,"privacy_level":null,"consent_version_id":null}"#;

    let request = SignupRequest::from_body(body)
        .unwrap()
        .into_onboarding()
        .unwrap();

    assert!(request.is_empty());
}

#[test]
fn given_blank_consent_id_then_it_is_absent() {
    let body = br#"{"consent_version_id":"  "}"#;

    let request = SignupRequest::from_body(body)
        .unwrap()
        .into_onboarding()
        .unwrap();

    assert_that!(request.consent_version_id, none());
}

#[test]
fn given_unknown_privacy_level_then_validation_error_names_field() {
    let body = br#"{"privacy_level":"public"}"#;

    let result = SignupRequest::from_body(body).unwrap().into_onboarding();

    assert!(matches!(
        result,
        Err(ApiError::Validation { field: Some(ref f), .. }) if f == "privacy_level"
    ));
}

#[test]
fn given_non_object_body_then_validation_error() {
    let result = SignupRequest::from_body(b"[1, 2, 3]");

    assert!(matches!(result, Err(ApiError::Validation { field: None, .. })));
}
