//! Schema migrations for the folder/file index and the identity tables.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

use driveshare_core::error::{AppError, ErrorKind};
use driveshare_core::result::AppResult;

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Applies every pending migration under `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    let known = MIGRATOR.iter().count();
    info!(known, "Applying tree index migrations");

    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Tree index migration failed: {e}"),
            e,
        )
    })?;

    info!("Tree index schema is current");
    Ok(())
}
