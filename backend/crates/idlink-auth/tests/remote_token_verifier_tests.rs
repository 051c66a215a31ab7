//! Remote verifier against a mocked identity provider

use idlink_auth::{AuthError, RemoteTokenVerifier, TokenVerifier};

use std::time::Duration;

use googletest::prelude::*;
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path, query_param},
};

const LOOKUP_PATH: &str = "/v1/accounts:lookup";

fn verifier_for(server: &MockServer, api_key: Option<&str>) -> RemoteTokenVerifier {
    RemoteTokenVerifier::new(
        &format!("{}{}", server.uri(), LOOKUP_PATH),
        api_key,
        Duration::from_secs(2),
    )
    .unwrap()
}

#[tokio::test]
async fn given_known_token_when_verified_then_returns_provider_claims() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LOOKUP_PATH))
        .and(query_param("key", "api-key-1"))
        .and(body_json(json!({ "idToken": "token-1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [{
                "localId": "abc123",
                "email": "u@example.com",
                "emailVerified": true,
                "displayName": "Ada"
            }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let verifier = verifier_for(&mock_server, Some("api-key-1"));
    let claims = verifier.verify("token-1").await.unwrap();

    assert_that!(claims.subject_id, eq("abc123"));
    assert_that!(claims.email, some(eq("u@example.com")));
    assert_that!(claims.email_verified, eq(true));
    assert_that!(claims.display_name, some(eq("Ada")));
}

#[tokio::test]
async fn given_sparse_account_when_verified_then_optional_fields_are_absent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LOOKUP_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [{ "localId": "abc123", "email": "" }]
        })))
        .mount(&mock_server)
        .await;

    let claims = verifier_for(&mock_server, None)
        .verify("token-1")
        .await
        .unwrap();

    assert_that!(claims.email, none());
    assert_that!(claims.email_verified, eq(false));
    assert_that!(claims.display_name, none());
}

#[tokio::test]
async fn given_provider_rejects_token_then_provider_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LOOKUP_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "code": 400, "message": "INVALID_ID_TOKEN" }
        })))
        .mount(&mock_server)
        .await;

    let result = verifier_for(&mock_server, None).verify("revoked").await;

    assert!(matches!(
        result,
        Err(AuthError::ProviderRejected { status: 400, .. })
    ));
}

#[tokio::test]
async fn given_no_matching_account_then_provider_response_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LOOKUP_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let result = verifier_for(&mock_server, None).verify("token-1").await;

    assert!(matches!(result, Err(AuthError::ProviderResponse { .. })));
}

#[tokio::test]
async fn given_malformed_body_then_provider_response_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LOOKUP_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let result = verifier_for(&mock_server, None).verify("token-1").await;

    assert!(matches!(result, Err(AuthError::ProviderResponse { .. })));
}

#[tokio::test]
async fn given_blank_local_id_then_invalid_claim() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LOOKUP_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [{ "localId": "  " }]
        })))
        .mount(&mock_server)
        .await;

    let result = verifier_for(&mock_server, None).verify("token-1").await;

    assert!(matches!(result, Err(AuthError::InvalidClaim { .. })));
}

async fn mount_account(server: &MockServer, local_id: &str) {
    Mock::given(method("POST"))
        .and(path(LOOKUP_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [{ "localId": local_id }]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn given_local_id_at_max_length_then_accepted() {
    let mock_server = MockServer::start().await;
    let local_id = "s".repeat(128);
    mount_account(&mock_server, &local_id).await;

    let claims = verifier_for(&mock_server, None)
        .verify("token-1")
        .await
        .unwrap();

    assert_that!(claims.subject_id, eq(local_id.as_str()));
}

#[tokio::test]
async fn given_local_id_over_max_length_then_invalid_claim() {
    let mock_server = MockServer::start().await;
    mount_account(&mock_server, &"s".repeat(129)).await;

    let result = verifier_for(&mock_server, None).verify("token-1").await;

    match result {
        Err(AuthError::InvalidClaim { claim, .. }) => assert_that!(claim, eq("localId")),
        other => panic!("expected InvalidClaim, got {other:?}"),
    }
}

#[tokio::test]
async fn given_unreachable_provider_then_provider_unavailable() {
    // Nothing listens on port 1
    let verifier = RemoteTokenVerifier::new(
        &format!("http://127.0.0.1:1{LOOKUP_PATH}"),
        None,
        Duration::from_secs(2),
    )
    .unwrap();

    let result = verifier.verify("token-1").await;

    assert!(matches!(
        result,
        Err(AuthError::ProviderUnavailable { .. })
    ));
}

#[test]
fn given_unparseable_url_then_construction_fails() {
    let result = RemoteTokenVerifier::new("not a url", None, Duration::from_secs(1));

    assert!(result.is_err());
}
