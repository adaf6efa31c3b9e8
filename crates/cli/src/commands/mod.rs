//! Command implementations.

pub mod inspect;
pub mod load;
pub mod migrate;

use order_dashboard_api::config::{ConfigError, get_database_url};
use order_dashboard_ingest::LoadError;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

/// Environment variable holding the database URL (falls back to `DATABASE_URL`).
pub const DATABASE_URL_VAR: &str = "ORDER_DASHBOARD_DATABASE_URL";

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration is missing or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A migration failed to apply.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Loading or profiling a source file failed.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Expected source files are absent and `--require-all` was given.
    #[error("Missing required files in {dir}: {}", files.join(", "))]
    MissingFiles { dir: String, files: Vec<String> },

    /// Reading the data directory failed.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON output could not be produced.
    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Connect to the dashboard database.
///
/// # Errors
///
/// Returns `CommandError::Config` if no database URL is configured and
/// `CommandError::Database` if the connection fails.
pub async fn connect() -> Result<PgPool, CommandError> {
    // Load .env file if present (ignore errors if not found)
    dotenvy::dotenv().ok();

    let database_url = get_database_url(DATABASE_URL_VAR)?;

    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.expose_secret())
        .await?;
    Ok(pool)
}
