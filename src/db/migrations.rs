use sqlx::{Pool, Sqlite};
use tracing::debug;

/// Run all pending database migrations
///
/// The SQL files under `migrations/` are embedded at compile time. sqlx
/// tracks which ones were applied, so this is safe on every start.
pub async fn run_migrations(pool: &Pool<Sqlite>) -> Result<(), sqlx::migrate::MigrateError> {
    debug!("Running database migrations...");

    sqlx::migrate!("./migrations").run(pool).await?;

    debug!("Database migrations completed successfully");
    Ok(())
}
