use crate::{
    AuthConfig, CONFIG_DIR_ENV, CONFIG_FILE_NAME, ConfigError, ConfigErrorResult, CorsConfig,
    DEFAULT_CONFIG_DIR_NAME, DatabaseConfig, Environment, IdentityConfig, LoggingConfig,
    ServerConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub identity: IdentityConfig,
    pub cors: CorsConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for IDLINK_CONFIG_DIR env var, else use ./.idlink/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply IDLINK_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILE_NAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: IDLINK_CONFIG_DIR env var > ./.idlink/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR_NAME))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let config_dir = Self::config_dir()?;

        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&config_dir)?;
        self.identity.validate()?;
        self.cors.validate()?;

        Ok(())
    }

    /// Get absolute path to database file.
    pub fn database_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.database.path))
    }

    /// Get absolute path to the RS256 public key, when one is configured.
    pub fn jwt_public_key_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        match &self.auth.jwt_public_key_path {
            Some(path) => Ok(Some(Self::config_dir()?.join(path))),
            None => Ok(None),
        }
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  environment: {}", self.environment);
        info!(
            "  server: {}:{} (request timeout {}s)",
            self.server.host, self.server.port, self.server.request_timeout_secs
        );
        info!(
            "  database: {} (max {} connections, busy timeout {}s)",
            self.database.path, self.database.max_connections, self.database.busy_timeout_secs
        );
        info!("  auth: {}", self.auth.describe());
        info!(
            "  identity: default privacy {}, display name <= {} chars",
            self.identity.default_privacy_level, self.identity.max_display_name_length
        );
        info!("  cors: {}", self.cors.allowed_origins.join(", "));
        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        Self::apply_env_parse("IDLINK_ENVIRONMENT", &mut self.environment);

        // Server
        Self::apply_env_string("IDLINK_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("IDLINK_SERVER_PORT", &mut self.server.port);
        Self::apply_env_parse(
            "IDLINK_SERVER_REQUEST_TIMEOUT_SECS",
            &mut self.server.request_timeout_secs,
        );

        // Database
        Self::apply_env_string("IDLINK_DATABASE_PATH", &mut self.database.path);
        Self::apply_env_parse(
            "IDLINK_DATABASE_MAX_CONNECTIONS",
            &mut self.database.max_connections,
        );
        Self::apply_env_parse(
            "IDLINK_DATABASE_BUSY_TIMEOUT_SECS",
            &mut self.database.busy_timeout_secs,
        );

        // Auth
        Self::apply_env_parse("IDLINK_AUTH_PROVIDER", &mut self.auth.provider);
        Self::apply_env_option_string("IDLINK_AUTH_JWT_SECRET", &mut self.auth.jwt_secret);
        Self::apply_env_option_string(
            "IDLINK_AUTH_JWT_PUBLIC_KEY_PATH",
            &mut self.auth.jwt_public_key_path,
        );
        Self::apply_env_option_string("IDLINK_AUTH_ISSUER", &mut self.auth.issuer);
        Self::apply_env_option_string("IDLINK_AUTH_AUDIENCE", &mut self.auth.audience);
        Self::apply_env_parse("IDLINK_AUTH_LEEWAY_SECS", &mut self.auth.leeway_secs);
        Self::apply_env_option_string(
            "IDLINK_AUTH_REMOTE_VERIFY_URL",
            &mut self.auth.remote_verify_url,
        );
        Self::apply_env_option_string("IDLINK_AUTH_REMOTE_API_KEY", &mut self.auth.remote_api_key);
        Self::apply_env_parse(
            "IDLINK_AUTH_REMOTE_TIMEOUT_SECS",
            &mut self.auth.remote_timeout_secs,
        );

        // Identity
        Self::apply_env_parse(
            "IDLINK_IDENTITY_DEFAULT_PRIVACY_LEVEL",
            &mut self.identity.default_privacy_level,
        );
        Self::apply_env_parse(
            "IDLINK_IDENTITY_MAX_DISPLAY_NAME_LENGTH",
            &mut self.identity.max_display_name_length,
        );

        // CORS
        if let Ok(list) = std::env::var("IDLINK_CORS_ALLOWED_ORIGINS") {
            self.cors.extend_from_list(&list);
        }

        // Logging
        Self::apply_env_parse("IDLINK_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("IDLINK_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("IDLINK_LOG_FILE", &mut self.logging.file);
        Self::apply_env_string("IDLINK_LOG_DIR", &mut self.logging.dir);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values.
    /// Unparseable values leave the target untouched.
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
