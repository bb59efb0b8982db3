//! Seed the catalog with the sample plants.

use nursery_storefront::db::ProductRepository;
use nursery_storefront::seed::seed_if_empty;

use super::{CommandResult, connect};

/// Insert the sample catalog into an empty product table.
pub async fn run() -> CommandResult {
    let pool = connect().await?;
    let inserted = seed_if_empty(&ProductRepository::new(pool)).await?;

    if inserted == 0 {
        tracing::info!("Catalog already has products; nothing seeded");
    } else {
        tracing::info!(count = inserted, "Catalog seeded");
    }
    Ok(())
}
