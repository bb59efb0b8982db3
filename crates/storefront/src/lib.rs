//! Nursery Storefront library.
//!
//! The catalog REST API as a library, so the binary, the CLI and the
//! integration tests share one router and one set of stores.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod seed;
pub mod services;
pub mod state;
pub mod telemetry;

/// Embedded migrations for the `nursery` schema.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
