//! Integration test harness for the Nursery storefront.
//!
//! [`TestApp`] builds the real router over in-memory stores and a memory
//! session store, so tests run without `PostgreSQL`. Requests can be sent
//! in-process with [`TestApp::request`] or over a socket after
//! [`TestApp::spawn`] for the HTTP client tests.
//!
//! ```bash
//! cargo test -p nursery-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use serde_json::Value;
use tower::ServiceExt;
use tower_sessions::MemoryStore;

use nursery_storefront::app;
use nursery_storefront::config::StorefrontConfig;
use nursery_storefront::db::{MemoryAdminStore, MemoryProductStore};
use nursery_storefront::middleware::create_session_layer;
use nursery_storefront::routes;
use nursery_storefront::seed::seed_if_empty;
use nursery_storefront::services::auth::AuthService;
use nursery_storefront::state::AppState;

/// Email of the admin every [`TestApp`] starts with.
pub const ADMIN_EMAIL: &str = "gardener@nursery.test";
/// Password of that admin.
pub const ADMIN_PASSWORD: &str = "correct-horse-staple";

/// Configuration pointing at no real database.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig::from_lookup(|key| {
        (key == "NURSERY_DATABASE_URL").then(|| "postgres://unused/nursery".to_string())
    })
    .unwrap()
}

/// The storefront router over in-memory stores.
pub struct TestApp {
    pub router: Router,
    pub products: Arc<MemoryProductStore>,
    pub admins: Arc<MemoryAdminStore>,
}

impl TestApp {
    /// An app with one admin and an empty catalog.
    pub async fn new() -> Self {
        let config = test_config();
        let products = Arc::new(MemoryProductStore::new());
        let admins = Arc::new(MemoryAdminStore::new());

        AuthService::new(admins.as_ref())
            .create_admin(ADMIN_EMAIL, "Head Gardener", ADMIN_PASSWORD)
            .await
            .unwrap();

        let sessions = create_session_layer(MemoryStore::default(), &config);
        let state = AppState::new(config, products.clone(), admins.clone());
        let router = app::router(routes::routes(), state, sessions);

        Self {
            router,
            products,
            admins,
        }
    }

    /// An app whose catalog holds the five sample plants.
    pub async fn seeded() -> Self {
        let app = Self::new().await;
        seed_if_empty(app.products.as_ref()).await.unwrap();
        app
    }

    /// Send one request through the router.
    pub async fn request(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Log in as the test admin and return the `Cookie` header value.
    pub async fn login_cookie(&self) -> String {
        let response = self
            .request(json_request(
                "POST",
                "/api/login",
                &serde_json::json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }),
            ))
            .await;
        assert_eq!(response.status(), 200, "test admin login failed");
        session_cookie(&response).unwrap()
    }

    /// Serve the app on an ephemeral local port.
    pub async fn spawn(self) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, self.router).await.unwrap();
        });
        addr
    }
}

/// A request with a JSON body.
#[must_use]
pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// A bodiless request, optionally carrying a session cookie.
#[must_use]
pub fn empty_request(method: &str, uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

/// The `name=value` pair from a response's `Set-Cookie` header.
#[must_use]
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    let set_cookie = response.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    set_cookie.split(';').next().map(str::to_string)
}

/// Read a response body as JSON.
pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Read a response body as text.
pub async fn text_body(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
