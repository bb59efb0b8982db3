//! Simulated checkout of the saved cart.

use clap::Args;

use nursery_client::{Checkout, PlaceOrderError};
use nursery_core::{CheckoutError, CheckoutForm, OrderSummary};

use super::cart::print_summary;
use super::{CommandResult, Shopper};

/// Shipping and payment details. Missing flags are validated like blank
/// form fields.
#[derive(Debug, Args)]
pub struct CheckoutArgs {
    #[arg(long, default_value = "")]
    first_name: String,
    #[arg(long, default_value = "")]
    last_name: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    address: String,
    #[arg(long, default_value = "")]
    city: String,
    #[arg(long, default_value = "")]
    zip: String,
    #[arg(long, default_value = "")]
    card_number: String,
    #[arg(long, default_value = "")]
    expiry: String,
    #[arg(long, default_value = "")]
    cvc: String,
}

impl From<CheckoutArgs> for CheckoutForm {
    fn from(args: CheckoutArgs) -> Self {
        Self {
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            address: args.address,
            city: args.city,
            zip: args.zip,
            card_number: args.card_number,
            expiry: args.expiry,
            cvc: args.cvc,
        }
    }
}

/// Place an order for everything in the cart.
#[allow(clippy::print_stdout)]
pub async fn run(args: CheckoutArgs) -> CommandResult {
    let shopper = Shopper::from_env()?;
    let mut cart = shopper.cart();
    let form = CheckoutForm::from(args);

    print_summary(&OrderSummary::for_cart(cart.cart()), cart.item_count());
    println!();
    println!("Processing...");

    let mut checkout = Checkout::new(shopper.config.checkout_delay);
    match checkout.place_order(&form, &mut cart, &mut rand::rng()).await {
        Ok(confirmation) => {
            println!("Order placed. Your order number is #{}", confirmation.order_code);
            Ok(())
        }
        Err(PlaceOrderError::Checkout(CheckoutError::Invalid(violations))) => {
            for violation in &violations {
                println!("  {}: {}", violation.field, violation.message);
            }
            Err("checkout form is invalid".into())
        }
        Err(e) => Err(e.into()),
    }
}
