//! Admin product management over the API.
//!
//! ```bash
//! NURSERY_ADMIN_EMAIL=admin@example.com NURSERY_ADMIN_PASSWORD=... \
//!     nursery product create --name "Pothos" --price 18.50 \
//!     --image-url https://images.example/pothos.jpg --category Indoor
//! ```

use clap::Args;
use secrecy::SecretString;

use nursery_client::{ApiClient, ClientError};
use nursery_core::{ProductDraft, ProductId};

use super::{CommandResult, Shopper};

/// Admin credentials used to open a session before each write.
#[derive(Debug, Args)]
pub struct AdminCredentials {
    #[arg(long = "admin-email", env = "NURSERY_ADMIN_EMAIL")]
    email: String,
    #[arg(long = "admin-password", env = "NURSERY_ADMIN_PASSWORD", hide_env_values = true)]
    password: SecretString,
}

/// Fields of a new product. Left unset, a field is sent as missing and the
/// API reports it.
#[derive(Debug, Args)]
pub struct ProductArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long, default_value = "")]
    description: String,
    #[arg(long)]
    price: Option<String>,
    #[arg(long)]
    image_url: Option<String>,
    #[arg(long)]
    category: Option<String>,
}

impl From<ProductArgs> for ProductDraft {
    fn from(args: ProductArgs) -> Self {
        Self {
            name: args.name,
            description: Some(args.description),
            price: args.price,
            image_url: args.image_url,
            category: args.category,
        }
    }
}

async fn login(credentials: &AdminCredentials) -> Result<ApiClient, Box<dyn std::error::Error>> {
    let api = Shopper::from_env()?.api()?;
    let admin = api.login(&credentials.email, &credentials.password).await?;
    tracing::debug!(admin_id = %admin.id, "Logged in");
    Ok(api)
}

#[allow(clippy::print_stdout)]
pub async fn create(credentials: AdminCredentials, args: ProductArgs) -> CommandResult {
    let api = login(&credentials).await?;

    match api.create_product(&ProductDraft::from(args)).await {
        Ok(product) => {
            println!("Created product {} ({})", product.id, product.name);
            api.logout().await?;
            Ok(())
        }
        Err(ClientError::Validation { message, field }) => {
            api.logout().await?;
            Err(match field {
                Some(field) => format!("{field}: {message}"),
                None => message,
            }
            .into())
        }
        Err(e) => Err(e.into()),
    }
}

#[allow(clippy::print_stdout)]
pub async fn delete(credentials: AdminCredentials, id: ProductId) -> CommandResult {
    let api = login(&credentials).await?;
    api.delete_product(id).await?;
    api.logout().await?;

    println!("Deleted product {id}");
    Ok(())
}
