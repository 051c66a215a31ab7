//! Find-or-create-then-merge of a local user against verified claims.

use crate::{IdentityError, Result as IdentityErrorResult};

use idlink_core::{PrivacyLevel, User, VerifiedClaims, utc_now};
use idlink_db::{InsertOutcome, UserRepository};

use chrono::{DateTime, Utc};
use log::{debug, info};
use sqlx::SqliteConnection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileOptions {
    /// Stamp `last_login_at` on every call. Set for authentication flows.
    pub set_last_login: bool,
    /// Privacy level given to users created by this reconciliation.
    pub default_privacy: PrivacyLevel,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            set_last_login: true,
            default_privacy: PrivacyLevel::Default,
        }
    }
}

/// What a reconciliation did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileAction {
    /// No row existed; this call inserted it.
    Created,
    /// No row existed when looked up, but a concurrent call inserted it first.
    AdoptedExisting,
    /// An existing row was rewritten.
    Updated,
    /// An existing row already matched; nothing was written.
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// The stored row as it reads after this call.
    pub user: User,
    pub action: ReconcileAction,
}

/// Resolve the local user for `claims`, creating or refreshing it as needed.
///
/// Runs entirely on `conn`. The returned user is always read back from the
/// store after any write.
pub async fn reconcile_user(
    conn: &mut SqliteConnection,
    claims: &VerifiedClaims,
    options: &ReconcileOptions,
) -> IdentityErrorResult<Reconciliation> {
    let existing =
        UserRepository::find_by_external_subject_id(&mut *conn, &claims.subject_id).await?;

    match existing {
        Some(user) => refresh_user(conn, user, claims, options).await,
        None => create_or_adopt(conn, claims, options).await,
    }
}

/// Insert a new user for `claims`.
///
/// If another writer already holds the subject id, the insert is discarded and
/// that writer's row is returned unchanged as [`ReconcileAction::AdoptedExisting`].
/// Any other store failure is returned as an error.
pub async fn create_or_adopt(
    conn: &mut SqliteConnection,
    claims: &VerifiedClaims,
    options: &ReconcileOptions,
) -> IdentityErrorResult<Reconciliation> {
    let candidate = User::from_claims(claims, options.default_privacy, options.set_last_login);

    match UserRepository::insert(&mut *conn, &candidate).await? {
        InsertOutcome::Created => {
            let user = UserRepository::find_by_id(&mut *conn, candidate.id)
                .await?
                .ok_or_else(|| IdentityError::vanished(candidate.id))?;

            info!(
                "Created user {} for subject {}",
                user.id, user.external_subject_id
            );

            Ok(Reconciliation {
                user,
                action: ReconcileAction::Created,
            })
        }
        InsertOutcome::Conflict => {
            let user = UserRepository::find_by_external_subject_id(&mut *conn, &claims.subject_id)
                .await?
                .ok_or_else(|| IdentityError::vanished(&claims.subject_id))?;

            info!(
                "Subject {} was created concurrently, adopting user {}",
                user.external_subject_id, user.id
            );

            Ok(Reconciliation {
                user,
                action: ReconcileAction::AdoptedExisting,
            })
        }
    }
}

async fn refresh_user(
    conn: &mut SqliteConnection,
    mut user: User,
    claims: &VerifiedClaims,
    options: &ReconcileOptions,
) -> IdentityErrorResult<Reconciliation> {
    let now = utc_now();
    let changed = merge_claims(&mut user, claims, options.set_last_login, now);

    if changed.is_empty() {
        debug!("User {} already matches its claims", user.id);
        return Ok(Reconciliation {
            user,
            action: ReconcileAction::Unchanged,
        });
    }

    user.updated_at = now;
    UserRepository::update(&mut *conn, &user).await?;

    debug!("Refreshed user {}: {}", user.id, changed.join(", "));

    let user = UserRepository::find_by_id(&mut *conn, user.id)
        .await?
        .ok_or_else(|| IdentityError::vanished(user.id))?;

    Ok(Reconciliation {
        user,
        action: ReconcileAction::Updated,
    })
}

/// Mirror provider-owned fields from `claims` onto `user`.
///
/// Absent claim values never blank out stored ones. `email_verified` is always
/// mirrored. `last_login_at` is stamped whenever `set_last_login` is set.
/// Returns the names of the fields that changed; `updated_at` is left to the caller.
pub(crate) fn merge_claims(
    user: &mut User,
    claims: &VerifiedClaims,
    set_last_login: bool,
    now: DateTime<Utc>,
) -> Vec<&'static str> {
    let mut changed = Vec::new();

    if let Some(email) = claims.email.as_deref()
        && !email.is_empty()
        && user.email != email
    {
        user.email = email.to_string();
        changed.push("email");
    }

    if user.email_verified != claims.email_verified {
        user.email_verified = claims.email_verified;
        changed.push("email_verified");
    }

    if let Some(name) = claims.display_name.as_deref()
        && !name.is_empty()
        && user.display_name.as_deref() != Some(name)
    {
        user.display_name = Some(name.to_string());
        changed.push("display_name");
    }

    if set_last_login {
        user.last_login_at = Some(now);
        changed.push("last_login_at");
    }

    changed
}
