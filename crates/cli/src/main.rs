//! Nursery CLI - maintenance tools and a terminal storefront.
//!
//! # Usage
//!
//! ```bash
//! # Database setup
//! nursery migrate
//! nursery seed
//! NURSERY_ADMIN_PASSWORD=... nursery admin create -e admin@example.com -n "Head Gardener"
//!
//! # Shopping
//! nursery catalog list --category succulents
//! nursery cart add 4
//! nursery cart set 4 3
//! nursery checkout --first-name Ada --last-name Lovelace ...
//!
//! # Catalog management (uses NURSERY_ADMIN_EMAIL / NURSERY_ADMIN_PASSWORD)
//! nursery product create --name Pothos --price 18.50 --image-url ... --category Indoor
//! nursery product delete 7
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use secrecy::SecretString;
use tracing_subscriber::EnvFilter;

use nursery_core::{CategoryFilter, ProductId};

mod commands;

use commands::checkout::CheckoutArgs;
use commands::product::{AdminCredentials, ProductArgs};

#[derive(Parser)]
#[command(name = "nursery")]
#[command(author, version, about = "Nursery storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Insert the sample plants into an empty catalog
    Seed,
    /// Manage admin users
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Browse the catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Manage the local cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Place an order for the cart (simulated payment)
    Checkout(CheckoutArgs),
    /// Create or delete products (admin)
    Product {
        #[command(flatten)]
        credentials: AdminCredentials,
        #[command(subcommand)]
        action: ProductAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new admin user
    Create {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Admin display name
        #[arg(short, long)]
        name: String,

        /// Password (at least 8 characters)
        #[arg(long, env = "NURSERY_ADMIN_PASSWORD", hide_env_values = true)]
        password: SecretString,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products
    List {
        /// `all`, `indoor`, `outdoor` or `succulents`
        #[arg(short, long, default_value = "all")]
        category: CategoryFilter,
    },
    /// Show one product
    Show { id: ProductId },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add one unit of a product
    Add { id: ProductId },
    /// Remove a product
    Remove { id: ProductId },
    /// Set a product's quantity (0 removes it)
    Set {
        id: ProductId,
        #[arg(allow_hyphen_values = true)]
        quantity: i64,
    },
    /// Show cart contents and totals
    Show,
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum ProductAction {
    /// Create a product
    Create(ProductArgs),
    /// Delete a product
    Delete { id: ProductId },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nursery_cli=info,nursery_storefront=info,nursery_client=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> commands::CommandResult {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await,
        Commands::Seed => commands::seed::run().await,
        Commands::Admin { action } => match action {
            AdminAction::Create {
                email,
                name,
                password,
            } => commands::admin::create(&email, &name, &password).await,
        },
        Commands::Catalog { action } => match action {
            CatalogAction::List { category } => commands::catalog::list(category).await,
            CatalogAction::Show { id } => commands::catalog::show(id).await,
        },
        Commands::Cart { action } => match action {
            CartAction::Add { id } => commands::cart::add(id).await,
            CartAction::Remove { id } => commands::cart::remove(id),
            CartAction::Set { id, quantity } => commands::cart::set(id, quantity),
            CartAction::Show => commands::cart::show(),
            CartAction::Clear => commands::cart::clear(),
        },
        Commands::Checkout(args) => commands::checkout::run(args).await,
        Commands::Product {
            credentials,
            action,
        } => match action {
            ProductAction::Create(args) => commands::product::create(credentials, args).await,
            ProductAction::Delete { id } => commands::product::delete(credentials, id).await,
        },
    }
}
