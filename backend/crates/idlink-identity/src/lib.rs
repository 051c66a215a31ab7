//! Keeps local user records consistent with externally verified identities.
//!
//! [`reconcile_user`] is the find-or-create-then-merge routine run on every
//! authenticated call; [`apply_onboarding`] is the second, signup-only pass.
//! [`IdentityService`] wires both to a pool and scopes one connection per call.

pub mod error;
pub mod onboarding;
pub mod reconciler;
pub mod service;

pub use error::{IdentityError, Result};
pub use onboarding::{OnboardingLimits, OnboardingRequest, apply_onboarding};
pub use reconciler::{
    ReconcileAction, ReconcileOptions, Reconciliation, create_or_adopt, reconcile_user,
};
pub use service::IdentityService;
