//! Product route handlers.
//!
//! Reads are public. Writes require an admin session; the session is checked
//! before the body is parsed or validated.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

use nursery_core::{Product, ProductDraft, ProductId};

use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Parse a path segment as a product id.
///
/// Anything that is not an integer cannot name a product, so it is reported
/// the same way as a missing one.
fn parse_id(raw: &str) -> Result<ProductId> {
    raw.parse().map_err(|_| AppError::product_not_found())
}

/// `GET /api/products` - the whole catalog, ordered by id.
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = state.products().list().await?;
    Ok(Json(products))
}

/// `GET /api/products/{id}`
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Product>> {
    let id = parse_id(&id)?;

    state
        .products()
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(AppError::product_not_found)
}

/// `POST /api/products` - validate and store a new product.
pub async fn create(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    body: std::result::Result<Json<ProductDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>)> {
    let Json(draft) = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let new_product = draft.into_new_product().map_err(|violation| {
        tracing::debug!(field = %violation.field, "product rejected by validation");
        AppError::Validation(violation)
    })?;

    let product = state.products().create(&new_product).await?;
    tracing::info!(product_id = %product.id, name = %product.name, admin = %admin.email, "product created");

    Ok((StatusCode::CREATED, Json(product)))
}

/// `DELETE /api/products/{id}` - no existence check; always 204 once authorized.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = parse_id(&id)?;

    state.products().delete(id).await?;
    tracing::info!(product_id = %id, admin = %admin.email, "product deleted");

    Ok(StatusCode::NO_CONTENT)
}
