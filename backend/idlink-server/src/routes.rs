use crate::error::{Result as ServerErrorResult, ServerError};
use crate::{
    AppState, get_consent_version, health, list_consent_versions, login, me, signup,
};

use idlink_config::CorsConfig;

use std::time::Duration;

use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
};

/// Build the application router with all endpoints
pub fn build_router(
    state: AppState,
    cors: &CorsConfig,
    request_timeout: Duration,
) -> ServerErrorResult<Router> {
    #[allow(deprecated)]
    let timeout = TimeoutLayer::new(request_timeout);

    let router = Router::new()
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/live", get(health::liveness))
        .route("/ready", get(health::readiness))
        // Auth endpoints
        .route("/auth/login", post(login))
        .route("/auth/signup", post(signup))
        .route("/auth/me", get(me))
        // Consent log
        .route("/consent/versions", get(list_consent_versions))
        .route("/consent/versions/{id}", get(get_consent_version))
        .with_state(state)
        .layer(timeout)
        .layer(cors_layer(cors)?);

    Ok(router)
}

/// Credentialed CORS for the configured origins only.
///
/// Credentials rule out wildcards, so methods and headers mirror the preflight.
pub fn cors_layer(cors: &CorsConfig) -> ServerErrorResult<CorsLayer> {
    let origins = cors
        .allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|_| ServerError::CorsOrigin {
                origin: origin.clone(),
            })
        })
        .collect::<ServerErrorResult<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}
