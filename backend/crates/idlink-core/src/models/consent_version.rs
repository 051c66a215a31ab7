//! Consent version entity - one entry of the append-only consent policy log.

use crate::{PublicConsentVersion, utc_now};

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A published consent policy text.
///
/// `version` and `content` never change after publication; new policy text
/// produces a new row. Only `is_active` is mutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsentVersion {
    pub id: Uuid,
    /// Unique human-readable label, e.g. "2024-01" or "v1.3"
    pub version: String,
    pub content: String,
    /// Whether new signups may reference this version
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl ConsentVersion {
    /// Create a new, active consent version
    pub fn new(version: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            version: version.into(),
            content: content.into(),
            is_active: true,
            created_at: utc_now(),
        }
    }

    pub fn public_view(&self) -> PublicConsentVersion {
        PublicConsentVersion::from(self)
    }
}
