//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health              - Liveness
//! GET    /health/ready        - Readiness (store reachable)
//!
//! # Products
//! GET    /api/products        - Whole catalog, ordered by id
//! GET    /api/products/{id}   - One product
//! POST   /api/products        - Create (admin)
//! DELETE /api/products/{id}   - Delete (admin)
//!
//! # Auth
//! POST   /api/login           - Start admin session
//! POST   /api/logout          - End session
//! GET    /api/auth/user       - Current admin
//! ```

pub mod auth;
pub mod health;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::login_rate_limiter;
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(products::index).post(products::create))
        .route(
            "/api/products/{id}",
            get(products::show).delete(products::delete),
        )
}

/// Create the auth routes router (login is not rate limited here).
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/logout", post(auth::logout))
        .route("/api/auth/user", get(auth::current_user))
}

/// Create all routes for the storefront.
///
/// The login route is included without a rate limiter; use
/// [`rate_limited_routes`] when serving real traffic.
pub fn routes() -> Router<AppState> {
    base_routes().route("/api/login", post(auth::login))
}

/// All routes, with the login route behind the per-IP rate limiter.
///
/// The limiter keys on the client address, so the server must be started
/// with connect info for requests that carry no proxy headers.
pub fn rate_limited_routes() -> Router<AppState> {
    let login = Router::new()
        .route("/api/login", post(auth::login))
        .layer(login_rate_limiter());

    base_routes().merge(login)
}

fn base_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(product_routes())
        .merge(auth_routes())
}
