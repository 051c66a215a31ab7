use crate::VerifiedClaims;

use googletest::prelude::*;

#[test]
fn given_empty_optional_fields_when_constructed_then_they_become_none() {
    let claims = VerifiedClaims::new(
        "sub-1",
        Some(String::new()),
        false,
        Some("   ".to_string()),
    );

    assert_that!(claims.email, none());
    assert_that!(claims.display_name, none());
}

#[test]
fn given_present_optional_fields_when_constructed_then_they_are_kept() {
    let claims = VerifiedClaims::new(
        "sub-1",
        Some("a@x.com".to_string()),
        true,
        Some("Ada".to_string()),
    );

    assert_that!(claims.subject_id, eq("sub-1"));
    assert_that!(claims.email, some(eq("a@x.com")));
    assert_that!(claims.display_name, some(eq("Ada")));
    assert_that!(claims.email_verified, eq(true));
}
