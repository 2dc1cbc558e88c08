use sqlx::{Pool, Postgres};
use tracing::info;

/// Run all pending database migrations.
///
/// The SQL files under migrations/ are embedded at compile time; sqlx
/// tracks which ones have already been applied, so this is safe to run
/// on every startup.
pub async fn run_migrations(pool: &Pool<Postgres>) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Running database migrations...");

    sqlx::migrate!("./migrations").run(pool).await?;

    info!("Database migrations completed");
    Ok(())
}
