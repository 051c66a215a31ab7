use crate::UserStatus;

use std::str::FromStr;

#[test]
fn test_user_status_as_str() {
    assert_eq!(UserStatus::Active.as_str(), "active");
    assert_eq!(UserStatus::Suspended.as_str(), "suspended");
    assert_eq!(UserStatus::Deleted.as_str(), "deleted");
}

#[test]
fn test_user_status_from_str() {
    assert_eq!(UserStatus::from_str("active").unwrap(), UserStatus::Active);
    assert_eq!(
        UserStatus::from_str("suspended").unwrap(),
        UserStatus::Suspended
    );
    assert_eq!(UserStatus::from_str("deleted").unwrap(), UserStatus::Deleted);
    assert!(UserStatus::from_str("banned").is_err());
    assert!(UserStatus::from_str("Active").is_err());
}

#[test]
fn test_user_status_default() {
    assert_eq!(UserStatus::default(), UserStatus::Active);
}
