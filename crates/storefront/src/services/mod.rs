//! Business logic services for the storefront server.
//!
//! # Services
//!
//! - `auth` - Admin password authentication

pub mod auth;
