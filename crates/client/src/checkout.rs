//! Simulated order placement.

use std::time::Duration;

use rand::Rng;

use nursery_core::{CheckoutFlow, CheckoutForm, CheckoutStep, OrderCode, OrderSummary};

use crate::cart::CartManager;
use crate::error::PlaceOrderError;
use crate::storage::LocalStorage;

/// Default pause while the payment is "processing".
pub const DEFAULT_PROCESSING_DELAY: Duration = Duration::from_secs(2);

/// What the shopper sees once the order is placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderConfirmation {
    pub order_code: OrderCode,
    pub summary: OrderSummary,
}

/// Drives one checkout from form to confirmation.
#[derive(Debug, Clone)]
pub struct Checkout {
    flow: CheckoutFlow,
    processing_delay: Duration,
}

impl Default for Checkout {
    fn default() -> Self {
        Self::new(DEFAULT_PROCESSING_DELAY)
    }
}

impl Checkout {
    #[must_use]
    pub fn new(processing_delay: Duration) -> Self {
        Self {
            flow: CheckoutFlow::new(),
            processing_delay,
        }
    }

    #[must_use]
    pub const fn step(&self) -> &CheckoutStep {
        self.flow.step()
    }

    /// Validate the form, wait out the processing delay, then clear the cart
    /// and issue an order code.
    ///
    /// # Errors
    ///
    /// Returns `PlaceOrderError::Checkout` if the form is invalid, the cart is
    /// empty or an order was already placed; nothing changes in that case.
    /// Returns `PlaceOrderError::Storage` if the emptied cart cannot be
    /// saved; the checkout returns to the form.
    pub async fn place_order<S, R>(
        &mut self,
        form: &CheckoutForm,
        cart: &mut CartManager<S>,
        rng: &mut R,
    ) -> Result<OrderConfirmation, PlaceOrderError>
    where
        S: LocalStorage,
        R: Rng + ?Sized,
    {
        let summary = self.flow.submit(form, cart.cart())?;
        tracing::info!(
            items = cart.item_count(),
            total = %summary.total,
            "processing simulated payment"
        );

        tokio::time::sleep(self.processing_delay).await;

        if let Err(e) = cart.clear() {
            tracing::error!(error = %e, "could not clear cart after checkout");
            self.flow.reset();
            return Err(e.into());
        }

        let order_code = OrderCode::generate(rng);
        self.flow.complete(order_code.clone())?;
        tracing::info!(order_code = %order_code, "order placed");

        Ok(OrderConfirmation {
            order_code,
            summary,
        })
    }

    /// Start over with a blank form.
    pub fn reset(&mut self) {
        self.flow.reset();
    }
}
