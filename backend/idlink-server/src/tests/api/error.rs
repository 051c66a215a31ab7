use crate::ApiError;

use idlink_auth::AuthError;
use idlink_db::DbError;
use idlink_identity::IdentityError;

use std::panic::Location;

use axum::response::IntoResponse;
use error_location::ErrorLocation;
use googletest::prelude::*;
use http::StatusCode;
use http_body_util::BodyExt;
use uuid::Uuid;

async fn response_json(error: ApiError) -> (StatusCode, serde_json::Value) {
    let response = error.into_response();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

fn here() -> ErrorLocation {
    ErrorLocation::from(Location::caller())
}

#[tokio::test]
async fn test_unauthenticated_returns_401_with_json_body() {
    let error = ApiError::Unauthenticated {
        message: "Token verification failed".into(),
        location: here(),
    };

    let (status, json) = response_json(error).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"]["code"], "UNAUTHENTICATED");
    assert_eq!(json["error"]["message"], "Token verification failed");
    assert!(json["error"].get("field").is_none());
}

#[tokio::test]
async fn test_validation_error_returns_400_with_field() {
    let error = ApiError::validation("Display name too long", Some("display_name"));

    let (status, json) = response_json(error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["field"], "display_name");
}

#[tokio::test]
async fn test_not_found_returns_404() {
    let (status, json) = response_json(ApiError::not_found("User not found")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "NOT_FOUND");
    assert_eq!(json["error"]["message"], "User not found");
}

#[tokio::test]
async fn test_internal_error_returns_500() {
    let error = ApiError::Internal {
        message: "Database operation failed".into(),
        location: here(),
    };

    let (status, json) = response_json(error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
}

#[test]
fn test_missing_header_maps_to_missing_token_message() {
    let error = ApiError::from(AuthError::MissingHeader { location: here() });

    assert!(matches!(
        error,
        ApiError::Unauthenticated { ref message, .. } if message == "Missing Authorization bearer token"
    ));
}

#[test]
fn test_provider_rejection_hides_cause() {
    let error = ApiError::from(AuthError::ProviderRejected {
        status: 400,
        location: here(),
    });

    match error {
        ApiError::Unauthenticated { message, .. } => {
            assert_that!(message, eq("Token verification failed"));
            assert_that!(message, not(contains_substring("400")));
        }
        other => panic!("expected Unauthenticated, got {other:?}"),
    }
}

#[test]
fn test_expired_token_maps_to_generic_message() {
    let error = ApiError::from(AuthError::TokenExpired { location: here() });

    assert!(matches!(
        error,
        ApiError::Unauthenticated { ref message, .. } if message == "Token verification failed"
    ));
}

#[test]
fn test_db_error_strips_details() {
    let error = ApiError::from(DbError::Migration {
        message: "no such table: users".into(),
        location: here(),
    });

    match error {
        ApiError::Internal { message, .. } => {
            assert_that!(message, eq("Database operation failed"));
        }
        other => panic!("expected Internal, got {other:?}"),
    }
}

#[test]
fn test_identity_validation_keeps_field() {
    let error = ApiError::from(IdentityError::Validation {
        field: "display_name",
        message: "must be at most 150 characters".into(),
        location: here(),
    });

    assert!(matches!(
        error,
        ApiError::Validation { field: Some(ref f), .. } if f == "display_name"
    ));
}

#[test]
fn test_unknown_consent_version_maps_to_validation() {
    let error = ApiError::from(IdentityError::ConsentVersionNotFound {
        id: Uuid::new_v4(),
        location: here(),
    });

    assert!(matches!(
        error,
        ApiError::Validation { field: Some(ref f), .. } if f == "consent_version_id"
    ));
}

#[test]
fn test_inactive_consent_version_maps_to_validation() {
    let error = ApiError::from(IdentityError::ConsentVersionInactive {
        id: Uuid::new_v4(),
        location: here(),
    });

    assert!(matches!(error, ApiError::Validation { .. }));
}

#[test]
fn test_identity_db_error_maps_to_internal() {
    let error = ApiError::from(IdentityError::from(user_not_found()));

    assert!(matches!(error, ApiError::Internal { .. }));
}

fn user_not_found() -> DbError {
    DbError::NotFound {
        entity: "User",
        key: "abc123".into(),
        location: here(),
    }
}
