use idlink_config::Config;
use idlink_db::{ConnectionManager, DatabaseOptions};
use idlink_identity::{IdentityService, OnboardingLimits, ReconcileOptions};
use idlink_server::{AppState, build_router, build_verifier, logger};

use std::error::Error;
use std::time::Duration;

use log::{error, info};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // .env is optional
    dotenvy::dotenv().ok();

    // Load and validate configuration
    let config = Config::load()?;
    config.validate()?;

    // Construct log file path if configured
    let log_file_path: Option<std::path::PathBuf> = if let Some(ref filename) = config.logging.file
    {
        let log_dir = Config::config_dir()?.join(&config.logging.dir);
        std::fs::create_dir_all(&log_dir)?;

        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(&config.logging, log_file_path)?;

    info!("Starting idlink-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // Open the store and apply migrations
    let database_options = DatabaseOptions::new(config.database_path()?)
        .with_max_connections(config.database.max_connections)
        .with_busy_timeout(Duration::from_secs(config.database.busy_timeout_secs))
        .with_statement_logging(config.environment.is_development());
    let pool = ConnectionManager::new(database_options).connect().await?;
    info!("Database ready");

    let verifier = build_verifier(&config.auth, config.jwt_public_key_path()?.as_deref())?;

    let identity = IdentityService::new(
        pool,
        ReconcileOptions {
            default_privacy: config.identity.default_privacy_level,
            ..ReconcileOptions::default()
        },
        OnboardingLimits {
            max_display_name_length: config.identity.max_display_name_length,
        },
    );

    let app = build_router(
        AppState::new(identity, verifier),
        &config.cors,
        Duration::from_secs(config.server.request_timeout_secs),
    )?;

    // Create TCP listener
    let listener = TcpListener::bind(config.bind_addr()).await?;

    // Get actual bound address (important when port is 0 / auto-assigned)
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Graceful shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
        Err(e) => error!("Failed to listen for SIGINT: {}", e),
    }
}
