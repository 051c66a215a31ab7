#![allow(dead_code)]

//! Test infrastructure for idlink-server API tests

use idlink_auth::{JwtTokenVerifier, TokenClaims};
use idlink_config::CorsConfig;
use idlink_core::ConsentVersion;
use idlink_db::{ConnectionManager, ConsentVersionRepository};
use idlink_identity::{IdentityService, OnboardingLimits, ReconcileOptions};
use idlink_server::{AppState, build_router};

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use http_body_util::BodyExt;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub const TEST_SECRET: &str = "server-test-secret-at-least-32-bytes";

/// Create a test pool with in-memory SQLite
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to create test database");

    ConnectionManager::migrate(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Create AppState for testing, verifying HS256 tokens signed with [`TEST_SECRET`]
pub async fn create_test_app_state() -> AppState {
    let pool = create_test_pool().await;
    let identity = IdentityService::new(
        pool,
        ReconcileOptions::default(),
        OnboardingLimits::default(),
    );
    let verifier = JwtTokenVerifier::with_hs256(TEST_SECRET.as_bytes());

    AppState::new(identity, Arc::new(verifier))
}

pub fn create_test_router(state: AppState) -> Router {
    build_router(state, &CorsConfig::default(), Duration::from_secs(30))
        .expect("Failed to build router")
}

/// Mint a token the test verifier accepts
pub fn mint_token(subject: &str, email: Option<&str>, verified: bool, name: Option<&str>) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = TokenClaims {
        sub: subject.to_string(),
        exp: now + 3600,
        iat: Some(now),
        email: email.map(str::to_string),
        email_verified: verified,
        name: name.map(str::to_string),
        display_name: None,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("Failed to mint token")
}

pub fn authed_request(method: &str, uri: &str, token: &str, body: Body) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(body)
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

pub async fn publish_consent(pool: &SqlitePool, label: &str, active: bool) -> ConsentVersion {
    let mut version = ConsentVersion::new(label, format!("Consent policy {label}"));
    version.is_active = active;
    ConsentVersionRepository::publish(pool, &version)
        .await
        .expect("Failed to publish consent version");
    version
}
