use crate::{ConfigError, ConfigErrorResult, DEFAULT_ALLOWED_ORIGINS};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Exact origins allowed to call the API with credentials
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|o| o.to_string())
                .collect(),
        }
    }
}

impl CorsConfig {
    /// Append origins from a comma-separated list, skipping blanks and duplicates.
    pub fn extend_from_list(&mut self, list: &str) {
        for origin in list.split(',').map(str::trim).filter(|o| !o.is_empty()) {
            if !self.allowed_origins.iter().any(|existing| existing == origin) {
                self.allowed_origins.push(origin.to_string());
            }
        }
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        for origin in &self.allowed_origins {
            if origin == "*" {
                return Err(ConfigError::cors(
                    "cors.allowed_origins cannot contain '*' when credentials are allowed",
                ));
            }
            if !(origin.starts_with("http://") || origin.starts_with("https://")) {
                return Err(ConfigError::cors(format!(
                    "cors.allowed_origins entry must start with http:// or https://, got '{origin}'"
                )));
            }
            if origin.ends_with('/') {
                return Err(ConfigError::cors(format!(
                    "cors.allowed_origins entry must not end with '/', got '{origin}'"
                )));
            }
        }

        Ok(())
    }
}
