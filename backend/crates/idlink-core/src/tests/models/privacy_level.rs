use crate::{CoreError, PrivacyLevel};

use std::str::FromStr;

#[test]
fn test_privacy_level_round_trips_through_str() {
    for level in [PrivacyLevel::Default, PrivacyLevel::Strict, PrivacyLevel::Custom] {
        assert_eq!(PrivacyLevel::from_str(level.as_str()).unwrap(), level);
    }
}

#[test]
fn test_privacy_level_rejects_unknown_value() {
    let result = PrivacyLevel::from_str("paranoid");

    assert!(matches!(
        result,
        Err(CoreError::InvalidPrivacyLevel { ref value, .. }) if value == "paranoid"
    ));
}

#[test]
fn test_privacy_level_deserializes_snake_case() {
    let level: PrivacyLevel = serde_json::from_str("\"strict\"").unwrap();
    assert_eq!(level, PrivacyLevel::Strict);

    assert!(serde_json::from_str::<PrivacyLevel>("\"STRICT\"").is_err());
}
