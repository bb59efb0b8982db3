//! Database migrations.
//!
//! ```bash
//! nursery migrate
//! ```

use tower_sessions_sqlx_store::PostgresStore;

use super::{CommandResult, connect};

/// Apply the catalog schema and the session table.
pub async fn run() -> CommandResult {
    let pool = connect().await?;

    tracing::info!("Running storefront migrations...");
    nursery_storefront::MIGRATOR.run(&pool).await?;

    tracing::info!("Creating session table...");
    PostgresStore::new(pool).migrate().await?;

    tracing::info!("Migrations complete");
    Ok(())
}
