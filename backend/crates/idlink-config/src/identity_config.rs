use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_MAX_DISPLAY_NAME_LENGTH, MAX_MAX_DISPLAY_NAME_LENGTH,
    MIN_MAX_DISPLAY_NAME_LENGTH,
};

use idlink_core::PrivacyLevel;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Privacy level given to newly created users
    pub default_privacy_level: PrivacyLevel,
    /// Longest display name accepted at signup, in characters
    pub max_display_name_length: usize,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            default_privacy_level: PrivacyLevel::default(),
            max_display_name_length: DEFAULT_MAX_DISPLAY_NAME_LENGTH,
        }
    }
}

impl IdentityConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        // The users table caps display_name at 150
        if !(MIN_MAX_DISPLAY_NAME_LENGTH..=MAX_MAX_DISPLAY_NAME_LENGTH)
            .contains(&self.max_display_name_length)
        {
            return Err(ConfigError::identity(format!(
                "identity.max_display_name_length must be {}-{}, got {}",
                MIN_MAX_DISPLAY_NAME_LENGTH,
                MAX_MAX_DISPLAY_NAME_LENGTH,
                self.max_display_name_length
            )));
        }

        Ok(())
    }
}
