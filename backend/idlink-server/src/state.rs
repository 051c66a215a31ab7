use idlink_auth::TokenVerifier;
use idlink_identity::IdentityService;

use std::sync::Arc;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub identity: IdentityService,
    pub verifier: Arc<dyn TokenVerifier>,
}

impl AppState {
    pub fn new(identity: IdentityService, verifier: Arc<dyn TokenVerifier>) -> Self {
        Self { identity, verifier }
    }
}
