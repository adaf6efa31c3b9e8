//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! od-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `ORDER_DASHBOARD_DATABASE_URL` - `PostgreSQL` connection string
//!   (falls back to `DATABASE_URL`)
//!
//! # Migration Files
//!
//! Migrations live in `crates/api/migrations/` and are embedded at build time.

use sqlx::PgPool;

use super::CommandError;

/// Apply every pending migration.
///
/// # Errors
///
/// Returns `CommandError::Migration` if a migration fails to apply.
pub async fn run(pool: &PgPool) -> Result<(), CommandError> {
    tracing::info!("Running migrations...");
    sqlx::migrate!("../api/migrations").run(pool).await?;
    tracing::info!("Migrations complete!");
    Ok(())
}
