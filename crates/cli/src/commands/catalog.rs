//! Browse the catalog.

use nursery_core::{CategoryFilter, Product, ProductId};

use super::{CommandResult, Shopper};

/// Print the catalog, optionally narrowed to one category.
#[allow(clippy::print_stdout)]
pub async fn list(filter: CategoryFilter) -> CommandResult {
    let shopper = Shopper::from_env()?;
    let products: Vec<Product> = shopper
        .api()?
        .list_products()
        .await?
        .into_iter()
        .filter(|p| filter.matches(p.category))
        .collect();

    if products.is_empty() {
        println!("No plants found ({filter}).");
        return Ok(());
    }

    for product in &products {
        println!(
            "{:>4}  {:<24} {:<11} {:>9}",
            product.id,
            product.name,
            product.category,
            product.price.to_string()
        );
    }
    Ok(())
}

/// Print one product in full.
#[allow(clippy::print_stdout)]
pub async fn show(id: ProductId) -> CommandResult {
    let shopper = Shopper::from_env()?;
    let product = shopper.api()?.get_product(id).await?;

    println!("{} ({})", product.name, product.category);
    println!("{}", product.price);
    if !product.description.is_empty() {
        println!();
        println!("{}", product.description);
    }
    println!();
    println!("{}", product.image_url);
    Ok(())
}
