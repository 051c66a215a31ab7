//! Signup-only merge of caller-chosen profile fields.

use crate::{IdentityError, Result as IdentityErrorResult};

use idlink_core::{PrivacyLevel, User, utc_now};
use idlink_db::{ConsentVersionRepository, UserRepository};

use log::debug;
use sqlx::SqliteConnection;
use uuid::Uuid;

/// Upper bound on a display name, in characters.
pub const MAX_DISPLAY_NAME_LENGTH: usize = 150;

/// Fields a caller may choose at signup. `None` leaves the stored value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OnboardingRequest {
    pub display_name: Option<String>,
    pub privacy_level: Option<PrivacyLevel>,
    pub consent_version_id: Option<Uuid>,
}

impl OnboardingRequest {
    pub fn is_empty(&self) -> bool {
        self.display_name().is_none()
            && self.privacy_level.is_none()
            && self.consent_version_id.is_none()
    }

    /// The requested display name; an empty string counts as not supplied.
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref().filter(|name| !name.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnboardingLimits {
    pub max_display_name_length: usize,
}

impl Default for OnboardingLimits {
    fn default() -> Self {
        Self {
            max_display_name_length: MAX_DISPLAY_NAME_LENGTH,
        }
    }
}

/// Apply `request` to an already reconciled `user`.
///
/// Each field is written only when supplied and different from the stored
/// value, and all changes land in a single update. A new consent reference must
/// name an existing, active consent version. Returns the user as stored.
pub async fn apply_onboarding(
    conn: &mut SqliteConnection,
    mut user: User,
    request: &OnboardingRequest,
    limits: &OnboardingLimits,
) -> IdentityErrorResult<User> {
    validate_request(request, limits)?;

    if let Some(id) = request.consent_version_id
        && user.consent_version_id != Some(id)
    {
        ensure_consent_acceptable(conn, id).await?;
    }

    let changed = merge_request(&mut user, request);
    if changed.is_empty() {
        debug!("Onboarding left user {} unchanged", user.id);
        return Ok(user);
    }

    user.updated_at = utc_now();
    UserRepository::update(&mut *conn, &user).await?;

    debug!("Onboarded user {}: {}", user.id, changed.join(", "));

    UserRepository::find_by_id(&mut *conn, user.id)
        .await?
        .ok_or_else(|| IdentityError::vanished(user.id))
}

pub(crate) fn validate_request(
    request: &OnboardingRequest,
    limits: &OnboardingLimits,
) -> IdentityErrorResult<()> {
    if let Some(name) = request.display_name()
        && name.chars().count() > limits.max_display_name_length
    {
        return Err(IdentityError::validation(
            "display_name",
            format!(
                "must be at most {} characters",
                limits.max_display_name_length
            ),
        ));
    }

    Ok(())
}

/// Copy the supplied, differing fields of `request` onto `user`.
pub(crate) fn merge_request(user: &mut User, request: &OnboardingRequest) -> Vec<&'static str> {
    let mut changed = Vec::new();

    if let Some(name) = request.display_name()
        && user.display_name.as_deref() != Some(name)
    {
        user.display_name = Some(name.to_string());
        changed.push("display_name");
    }

    if let Some(level) = request.privacy_level
        && user.privacy_level != level
    {
        user.privacy_level = level;
        changed.push("privacy_level");
    }

    if let Some(id) = request.consent_version_id
        && user.consent_version_id != Some(id)
    {
        user.consent_version_id = Some(id);
        changed.push("consent_version_id");
    }

    changed
}

/// The consent version `id` must exist and still be active.
pub(crate) async fn ensure_consent_acceptable(
    conn: &mut SqliteConnection,
    id: Uuid,
) -> IdentityErrorResult<()> {
    match ConsentVersionRepository::find_by_id(&mut *conn, id).await? {
        None => Err(IdentityError::consent_not_found(id)),
        Some(version) if !version.is_active => Err(IdentityError::consent_inactive(id)),
        Some(_) => Ok(()),
    }
}
