//! User entity - the local mirror of one external identity.

use crate::{PrivacyLevel, PublicUser, UserStatus, VerifiedClaims, utc_now};

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A locally-known identity linked to exactly one external subject.
///
/// `external_subject_id` is the join key to the identity provider and is
/// unique across the store. `email` is mirrored from the latest verified
/// token and is not unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub external_subject_id: String,
    pub email: String,
    pub email_verified: bool,
    pub display_name: Option<String>,
    /// Reserved for an envelope-encrypted PII payload. Never read or written
    /// by the identity flows and never projected.
    pub pii_encrypted_blob: Option<Vec<u8>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub status: UserStatus,
    pub privacy_level: PrivacyLevel,
    pub consent_version_id: Option<Uuid>,
}

impl User {
    /// Build a new, not yet persisted user from verified claims.
    ///
    /// A missing email becomes the empty string; `last_login_at` is stamped
    /// only when the creation is part of an authentication flow.
    pub fn from_claims(
        claims: &VerifiedClaims,
        privacy_level: PrivacyLevel,
        set_last_login: bool,
    ) -> Self {
        let now = utc_now();
        Self {
            id: Uuid::new_v4(),
            external_subject_id: claims.subject_id.clone(),
            email: claims.email.clone().unwrap_or_default(),
            email_verified: claims.email_verified,
            display_name: claims.display_name.clone(),
            pii_encrypted_blob: None,
            created_at: now,
            updated_at: now,
            last_login_at: set_last_login.then_some(now),
            status: UserStatus::Active,
            privacy_level,
            consent_version_id: None,
        }
    }

    /// Safe-to-return view of this user.
    pub fn public_view(&self) -> PublicUser {
        PublicUser::from(self)
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }
}
