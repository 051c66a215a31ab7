use serde::{Deserialize, Serialize};

/// Attributes extracted from a credential after successful verification.
///
/// Optional string fields are never `Some("")`; verifiers normalize empty
/// provider values to `None` so that downstream merges can treat "absent"
/// uniformly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedClaims {
    /// The provider's stable unique identifier for the user.
    pub subject_id: String,
    pub email: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
    pub display_name: Option<String>,
}

impl VerifiedClaims {
    pub fn new(
        subject_id: impl Into<String>,
        email: Option<String>,
        email_verified: bool,
        display_name: Option<String>,
    ) -> Self {
        Self {
            subject_id: subject_id.into(),
            email: non_empty(email),
            email_verified,
            display_name: non_empty(display_name),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
