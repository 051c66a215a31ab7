use crate::ConsentVersion;
use crate::models::public_user::format_timestamp;

use serde::Serialize;

/// The externally visible shape of a [`ConsentVersion`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicConsentVersion {
    pub id: String,
    pub version: String,
    pub is_active: bool,
    pub created_at: String,
    pub content: String,
}

impl From<&ConsentVersion> for PublicConsentVersion {
    fn from(c: &ConsentVersion) -> Self {
        Self {
            id: c.id.to_string(),
            version: c.version.clone(),
            is_active: c.is_active,
            created_at: format_timestamp(&c.created_at),
            content: c.content.clone(),
        }
    }
}
