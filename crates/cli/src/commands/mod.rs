//! Command implementations.
//!
//! Database commands read `StorefrontConfig`; shopper and admin commands go
//! through the HTTP API with `ClientConfig`.

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod migrate;
pub mod product;
pub mod seed;

use nursery_client::{ApiClient, CartManager, ClientConfig, FileStorage};
use nursery_storefront::config::StorefrontConfig;
use nursery_storefront::db::create_pool;
use sqlx::PgPool;

/// Boxed error returned by every command.
pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Connect to the storefront database.
pub async fn connect() -> Result<PgPool, Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    tracing::info!("Connecting to storefront database...");
    Ok(create_pool(&config.database_url).await?)
}

/// API client and local state for shopper commands.
pub struct Shopper {
    pub config: ClientConfig,
}

impl Shopper {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            config: ClientConfig::from_env()?,
        })
    }

    pub fn api(&self) -> Result<ApiClient, Box<dyn std::error::Error>> {
        Ok(ApiClient::new(self.config.api_url.clone())?)
    }

    pub fn cart(&self) -> CartManager<FileStorage> {
        CartManager::load(FileStorage::new(&self.config.data_dir))
    }
}
