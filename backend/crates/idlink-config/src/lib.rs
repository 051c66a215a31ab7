mod auth_config;
mod config;
mod cors_config;
mod database_config;
mod environment;
mod error;
mod identity_config;
mod log_level;
mod logging_config;
mod server_config;

pub use auth_config::{AuthConfig, AuthProvider};
pub use config::Config;
pub use cors_config::CorsConfig;
pub use database_config::DatabaseConfig;
pub use environment::Environment;
pub use error::{ConfigError, ConfigErrorResult};
pub use identity_config::IdentityConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use server_config::ServerConfig;

const CONFIG_DIR_ENV: &str = "IDLINK_CONFIG_DIR";
const DEFAULT_CONFIG_DIR_NAME: &str = ".idlink";
const CONFIG_FILE_NAME: &str = "config.toml";

// Server
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const MIN_PORT: u16 = 1024;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;
const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

// Database
const DEFAULT_DATABASE_FILENAME: &str = "idlink.db";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const MIN_DB_MAX_CONNECTIONS: u32 = 1;
const MAX_DB_MAX_CONNECTIONS: u32 = 100;
const DEFAULT_DB_BUSY_TIMEOUT_SECS: u64 = 5;

// Auth
const MIN_JWT_SECRET_LENGTH: usize = 32;
const DEFAULT_JWT_LEEWAY_SECS: u64 = 30;
const DEFAULT_REMOTE_TIMEOUT_SECS: u64 = 5;
const MIN_REMOTE_TIMEOUT_SECS: u64 = 1;
const MAX_REMOTE_TIMEOUT_SECS: u64 = 60;

// Identity
const DEFAULT_MAX_DISPLAY_NAME_LENGTH: usize = 150;
const MIN_MAX_DISPLAY_NAME_LENGTH: usize = 1;
const MAX_MAX_DISPLAY_NAME_LENGTH: usize = 150;

// CORS
const DEFAULT_ALLOWED_ORIGINS: &[&str] = &["http://localhost:3000", "http://localhost:8000"];

// Logging
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";

#[cfg(test)]
mod tests;
