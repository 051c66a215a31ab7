use crate::User;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// The externally visible shape of a [`User`].
///
/// Timestamps are RFC 3339 strings with millisecond precision. The encrypted
/// PII payload has no counterpart here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicUser {
    pub id: String,
    pub external_subject_id: String,
    pub email: String,
    pub email_verified: bool,
    pub display_name: Option<String>,
    pub status: String,
    pub privacy_level: String,
    pub consent_version_id: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub last_login_at: Option<String>,
}

impl From<&User> for PublicUser {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.to_string(),
            external_subject_id: u.external_subject_id.clone(),
            email: u.email.clone(),
            email_verified: u.email_verified,
            display_name: u.display_name.clone(),
            status: u.status.as_str().to_string(),
            privacy_level: u.privacy_level.as_str().to_string(),
            consent_version_id: u.consent_version_id.map(|id| id.to_string()),
            created_at: Some(format_timestamp(&u.created_at)),
            updated_at: Some(format_timestamp(&u.updated_at)),
            last_login_at: u.last_login_at.as_ref().map(format_timestamp),
        }
    }
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self::from(&u)
    }
}

pub(crate) fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, false)
}
