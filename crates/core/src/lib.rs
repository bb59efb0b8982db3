//! Nursery Core - shared domain types.
//!
//! Used by every Nursery component:
//! - `storefront` - the catalog API server
//! - `client` - API client, persistent cart and simulated checkout
//! - `cli` - migrations, seeding and a terminal storefront
//!
//! The core crate holds data and rules only: no I/O, no database access and
//! no HTTP. Enable the `postgres` feature for `sqlx` encoding of the value
//! types.
//!
//! # Modules
//!
//! - [`types`] - ids, prices, categories and emails
//! - [`admin`] - the logged-in admin identity
//! - [`product`] - catalog products and the create request
//! - [`cart`] - cart contents and totals
//! - [`checkout`] - checkout form, order summary and order codes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod admin;
pub mod cart;
pub mod checkout;
pub mod product;
pub mod types;
pub mod validation;

pub use admin::CurrentAdmin;
pub use cart::{AddOutcome, Cart, CartItem};
pub use checkout::{CheckoutError, CheckoutFlow, CheckoutForm, CheckoutStep, OrderCode, OrderSummary};
pub use product::{NewProduct, Product, ProductDraft};
pub use types::*;
pub use validation::FieldError;
