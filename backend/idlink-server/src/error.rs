use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] idlink_config::ConfigError),

    #[error("Database error: {0}")]
    Db(#[from] idlink_db::DbError),

    #[error("Token verifier error: {0}")]
    Auth(#[from] idlink_auth::AuthError),

    #[error("Failed to read JWT key file {path}: {source}")]
    JwtKeyFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid CORS origin '{origin}'")]
    CorsOrigin { origin: String },

    #[error("Logger error: {message}")]
    Logger { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
