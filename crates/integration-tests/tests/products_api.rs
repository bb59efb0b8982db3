//! Catalog API tests against the in-memory router.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::json;

use nursery_core::ProductId;
use nursery_integration_tests::{TestApp, empty_request, json_body, json_request};
use nursery_storefront::db::ProductStore;

fn pothos() -> serde_json::Value {
    json!({
        "name": "Golden Pothos",
        "description": "Trailing vine that tolerates low light.",
        "price": "18.50",
        "imageUrl": "https://images.example/pothos.jpg",
        "category": "Indoor"
    })
}

fn with_cookie(mut request: Request<Body>, cookie: &str) -> Request<Body> {
    request
        .headers_mut()
        .insert(header::COOKIE, cookie.parse().unwrap());
    request
}

// ============================================================================
// Reads
// ============================================================================

#[tokio::test]
async fn test_list_returns_catalog_in_id_order() {
    let app = TestApp::seeded().await;

    let response = app.request(empty_request("GET", "/api/products", None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let products = body.as_array().unwrap();
    assert_eq!(products.len(), 5);
    assert_eq!(products[0]["id"], 1);
    assert_eq!(products[0]["name"], "Monstera Deliciosa");
    assert_eq!(products[0]["price"], "45.00");
    assert_eq!(products[0]["category"], "Indoor");
    assert!(products[0]["imageUrl"].as_str().unwrap().starts_with("https://"));
    assert_eq!(products[4]["name"], "Lavender");
}

#[tokio::test]
async fn test_list_empty_catalog() {
    let app = TestApp::new().await;

    let response = app.request(empty_request("GET", "/api/products", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!([]));
}

#[tokio::test]
async fn test_show_product() {
    let app = TestApp::seeded().await;

    let response = app.request(empty_request("GET", "/api/products/2", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["name"], "Snake Plant");
}

#[tokio::test]
async fn test_show_missing_product_is_404() {
    let app = TestApp::seeded().await;

    for uri in ["/api/products/999", "/api/products/monstera"] {
        let response = app.request(empty_request("GET", uri, None)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(
            json_body(response).await,
            json!({ "message": "Product not found" })
        );
    }
}

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn test_create_requires_login() {
    let app = TestApp::new().await;

    let response = app
        .request(json_request("POST", "/api/products", &pothos()))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await["message"], "Unauthorized");
    assert_eq!(app.products.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_auth_is_checked_before_validation() {
    let app = TestApp::new().await;

    let response = app
        .request(json_request("POST", "/api/products", &json!({})))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_product() {
    let app = TestApp::seeded().await;
    let cookie = app.login_cookie().await;

    let response = app
        .request(with_cookie(
            json_request("POST", "/api/products", &pothos()),
            &cookie,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = json_body(response).await;
    assert_eq!(created["id"], 6);
    assert_eq!(created["name"], "Golden Pothos");
    assert_eq!(created["price"], "18.50");

    let stored = app.products.get(ProductId::new(6)).await.unwrap().unwrap();
    assert_eq!(stored.image_url, "https://images.example/pothos.jpg");
}

#[tokio::test]
async fn test_create_missing_name_is_rejected_and_not_stored() {
    let app = TestApp::new().await;
    let cookie = app.login_cookie().await;

    let mut body = pothos();
    body.as_object_mut().unwrap().remove("name");

    let response = app
        .request(with_cookie(
            json_request("POST", "/api/products", &body),
            &cookie,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({ "message": "Name is required", "field": "name" })
    );
    assert_eq!(app.products.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_reports_first_invalid_field() {
    let app = TestApp::new().await;
    let cookie = app.login_cookie().await;

    let mut body = pothos();
    body["price"] = json!("cheap");
    body["category"] = json!("Aquatic");

    let response = app
        .request(with_cookie(
            json_request("POST", "/api/products", &body),
            &cookie,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["field"], "price");

    body["price"] = json!("9.99");
    let response = app
        .request(with_cookie(
            json_request("POST", "/api/products", &body),
            &cookie,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["field"], "category");
}

#[tokio::test]
async fn test_create_normalizes_price_to_cents() {
    let app = TestApp::new().await;
    let cookie = app.login_cookie().await;

    for (input, expected) in [("12", "12.00"), ("12.5", "12.50")] {
        let mut body = pothos();
        body["price"] = json!(input);
        let response = app
            .request(with_cookie(
                json_request("POST", "/api/products", &body),
                &cookie,
            ))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(json_body(response).await["price"], expected);
    }
}

#[tokio::test]
async fn test_create_price_too_large_is_400() {
    let app = TestApp::new().await;
    let cookie = app.login_cookie().await;

    let mut body = pothos();
    body["price"] = json!("1000000000");
    let response = app
        .request(with_cookie(
            json_request("POST", "/api/products", &body),
            &cookie,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["field"], "price");
    assert_eq!(app.products.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_malformed_json_is_400() {
    let app = TestApp::new().await;
    let cookie = app.login_cookie().await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/products")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::COOKIE, &cookie)
        .body(Body::from("{\"name\": "))
        .unwrap();

    let response = app.request(request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert!(!body["message"].as_str().unwrap().is_empty());
    assert!(body.get("field").is_none());
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn test_delete_requires_login() {
    let app = TestApp::seeded().await;

    let response = app
        .request(empty_request("DELETE", "/api/products/1", None))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(app.products.count().await.unwrap(), 5);
}

#[tokio::test]
async fn test_delete_product() {
    let app = TestApp::seeded().await;
    let cookie = app.login_cookie().await;

    let response = app
        .request(empty_request("DELETE", "/api/products/3", Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.request(empty_request("GET", "/api/products/3", None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.products.count().await.unwrap(), 4);
}

#[tokio::test]
async fn test_delete_unknown_id_still_succeeds() {
    let app = TestApp::seeded().await;
    let cookie = app.login_cookie().await;

    let response = app
        .request(empty_request("DELETE", "/api/products/404", Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(app.products.count().await.unwrap(), 5);
}
