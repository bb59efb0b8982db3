//! Cart commands. The cart lives in the local data directory.

use nursery_client::Notice;
use nursery_core::{Cart, OrderSummary, ProductId};

use super::{CommandResult, Shopper};

/// Fetch a product and add one unit of it.
#[allow(clippy::print_stdout)]
pub async fn add(id: ProductId) -> CommandResult {
    let shopper = Shopper::from_env()?;
    let product = shopper.api()?.get_product(id).await?;
    let name = product.name.clone();

    let mut cart = shopper.cart();
    let outcome = cart.add(product)?;

    let notice = Notice::for_add(outcome, &name);
    println!("{}: {}", notice.title, notice.description);
    Ok(())
}

#[allow(clippy::print_stdout)]
pub fn remove(id: ProductId) -> CommandResult {
    let mut cart = Shopper::from_env()?.cart();
    if !cart.remove(id)? {
        println!("Product {id} is not in the cart.");
    }
    print_cart(cart.cart());
    Ok(())
}

/// Set a line's quantity; zero or less removes it.
pub fn set(id: ProductId, quantity: i64) -> CommandResult {
    let mut cart = Shopper::from_env()?.cart();
    cart.set_quantity(id, quantity)?;
    print_cart(cart.cart());
    Ok(())
}

pub fn show() -> CommandResult {
    let cart = Shopper::from_env()?.cart();
    print_cart(cart.cart());
    Ok(())
}

pub fn clear() -> CommandResult {
    let mut cart = Shopper::from_env()?.cart();
    cart.clear()?;
    print_cart(cart.cart());
    Ok(())
}

/// Print the cart lines and order summary.
#[allow(clippy::print_stdout)]
pub fn print_cart(cart: &Cart) {
    if cart.is_empty() {
        println!("Your cart is empty.");
        return;
    }

    for item in cart.items() {
        println!(
            "{:>4}  {:<24} {:>3} x {:>9} = {:>9}",
            item.product.id,
            item.product.name,
            item.quantity,
            item.product.price.to_string(),
            item.line_total().to_string()
        );
    }
    print_summary(&OrderSummary::for_cart(cart), cart.item_count());
}

#[allow(clippy::print_stdout)]
pub fn print_summary(summary: &OrderSummary, item_count: u32) {
    println!();
    println!("Subtotal ({item_count} items) {:>12}", summary.subtotal.to_string());
    println!("Shipping {:>22}", "Free");
    println!("Tax (est.) {:>20}", summary.tax.to_string());
    println!("Total {:>25}", summary.total.to_string());
}

