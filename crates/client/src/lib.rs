//! Nursery Client - the shopper and admin side of the storefront.
//!
//! - [`api`] - REST client for the catalog, login and admin writes
//! - [`storage`] - local key-value storage (files or memory)
//! - [`cart`] - the cart, persisted on every change
//! - [`checkout`] - simulated order placement
//! - [`config`] - environment configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod storage;

pub use api::ApiClient;
pub use cart::{CART_STORAGE_KEY, CartManager, Notice};
pub use checkout::{Checkout, OrderConfirmation};
pub use config::ClientConfig;
pub use error::{ClientError, PlaceOrderError, StorageError};
pub use storage::{FileStorage, LocalStorage, MemoryStorage};
