//! Storage for the catalog and admin accounts.
//!
//! # Database: schema `nursery`
//!
//! ## Tables
//!
//! - `product` - The plant catalog
//! - `admin_user` - Operators allowed to create and delete products
//! - `tower_sessions.session` - Session storage (created by the session store)
//!
//! Handlers never see a connection pool directly. They go through the
//! [`ProductStore`] and [`AdminStore`] traits, which have `PostgreSQL`
//! implementations for production and in-memory ones for tests and local
//! experiments.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p nursery-cli -- migrate
//! ```

pub mod admin_users;
pub mod memory;
pub mod products;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use nursery_core::{Email, NewProduct, Product, ProductId};

use crate::models::AdminUser;

pub use admin_users::AdminUserRepository;
pub use memory::{MemoryAdminStore, MemoryProductStore};
pub use products::ProductRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// The product table.
///
/// Products are only ever listed, fetched, created and deleted; there is no
/// update path.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Every product, ordered by id.
    async fn list(&self) -> Result<Vec<Product>, RepositoryError>;

    /// One product, or `None` if no row has this id.
    async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError>;

    /// Insert a product and return it with its assigned id.
    async fn create(&self, product: &NewProduct) -> Result<Product, RepositoryError>;

    /// Delete a product. Deleting an unknown id is not an error.
    async fn delete(&self, id: ProductId) -> Result<(), RepositoryError>;

    /// Number of products in the catalog.
    async fn count(&self) -> Result<u64, RepositoryError>;

    /// Cheap round trip used by the readiness probe.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Admin accounts.
#[async_trait]
pub trait AdminStore: Send + Sync {
    /// The admin together with their stored password hash.
    async fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(AdminUser, String)>, RepositoryError>;

    /// Create an admin.
    ///
    /// Returns [`RepositoryError::Conflict`] if the email is taken.
    async fn create(
        &self,
        email: &Email,
        name: &str,
        password_hash: &str,
    ) -> Result<AdminUser, RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Map a unique-constraint violation to [`RepositoryError::Conflict`].
pub(crate) fn conflict_on_unique(e: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(format!("{what} already exists"));
    }
    RepositoryError::Database(e)
}
