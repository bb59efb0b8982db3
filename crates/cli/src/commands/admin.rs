//! Admin account management.
//!
//! ```bash
//! NURSERY_ADMIN_PASSWORD=... nursery admin create -e admin@example.com -n "Head Gardener"
//! ```

use secrecy::{ExposeSecret, SecretString};

use nursery_storefront::db::AdminUserRepository;
use nursery_storefront::services::auth::AuthService;

use super::{CommandResult, connect};

/// Create an admin who can log in to the API.
pub async fn create(email: &str, name: &str, password: &SecretString) -> CommandResult {
    let pool = connect().await?;
    let admins = AdminUserRepository::new(pool);

    let admin = AuthService::new(&admins)
        .create_admin(email, name, password.expose_secret())
        .await?;

    tracing::info!(admin_id = %admin.id, email = %admin.email, "Admin user created");
    Ok(())
}
