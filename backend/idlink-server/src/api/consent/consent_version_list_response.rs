use idlink_core::PublicConsentVersion;

use serde::Serialize;

/// Consent version list response
#[derive(Debug, Serialize)]
pub struct ConsentVersionListResponse {
    pub consent_versions: Vec<PublicConsentVersion>,
}
