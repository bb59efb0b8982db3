//! HTTP client for the storefront REST API.
//!
//! The client keeps a cookie jar, so logging in once authorizes the create
//! and delete calls that follow on the same instance.

use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, instrument, warn};
use url::Url;

use nursery_core::{CurrentAdmin, Product, ProductDraft, ProductId};

use crate::error::ClientError;

/// JSON error body returned by the API.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    field: Option<String>,
}

/// Storefront API client.
#[derive(Clone)]
pub struct ApiClient {
    /// HTTP client with a cookie store for the admin session.
    client: Client,
    /// Base URL; always ends in `/` so relative joins keep any path prefix.
    base_url: Url,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client for the storefront at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Request` if the HTTP client cannot be built.
    pub fn new(mut base_url: Url) -> Result<Self, ClientError> {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| ClientError::Request(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch the whole catalog.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the API answers with an error.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ClientError> {
        let response = self
            .client
            .get(self.endpoint("api/products")?)
            .send()
            .await
            .map_err(|e| ClientError::Request(e.to_string()))?;

        let products: Vec<Product> = decode(check(response).await?).await?;
        debug!(count = products.len(), "Fetched catalog");
        Ok(products)
    }

    /// Fetch one product.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if no product has this id.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, ClientError> {
        let response = self
            .client
            .get(self.endpoint(&format!("api/products/{id}"))?)
            .send()
            .await
            .map_err(|e| ClientError::Request(e.to_string()))?;

        decode(check(response).await?).await
    }

    /// Create a product. Requires a logged-in admin.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Unauthorized` without a session and
    /// `ClientError::Validation` when the API rejects a field.
    #[instrument(skip(self, draft))]
    pub async fn create_product(&self, draft: &ProductDraft) -> Result<Product, ClientError> {
        let response = self
            .client
            .post(self.endpoint("api/products")?)
            .json(draft)
            .send()
            .await
            .map_err(|e| ClientError::Request(e.to_string()))?;

        let product: Product = decode(check(response).await?).await?;
        debug!(product_id = %product.id, "Product created");
        Ok(product)
    }

    /// Delete a product. Requires a logged-in admin.
    ///
    /// Succeeds whether or not the product existed.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Unauthorized` without a session.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: ProductId) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.endpoint(&format!("api/products/{id}"))?)
            .send()
            .await
            .map_err(|e| ClientError::Request(e.to_string()))?;

        check(response).await?;
        Ok(())
    }

    /// Log in as an admin; the session cookie is kept for later calls.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Unauthorized` for bad credentials.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<CurrentAdmin, ClientError> {
        let body = serde_json::json!({
            "email": email,
            "password": password.expose_secret(),
        });

        let response = self
            .client
            .post(self.endpoint("api/login")?)
            .json(&body)
            .send()
            .await
            .map_err(|e| ClientError::Request(e.to_string()))?;

        decode(check(response).await?).await
    }

    /// End the admin session.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), ClientError> {
        let response = self
            .client
            .post(self.endpoint("api/logout")?)
            .send()
            .await
            .map_err(|e| ClientError::Request(e.to_string()))?;

        check(response).await?;
        Ok(())
    }

    /// The admin this client is logged in as.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Unauthorized` when not logged in.
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> Result<CurrentAdmin, ClientError> {
        let response = self
            .client
            .get(self.endpoint("api/auth/user")?)
            .send()
            .await
            .map_err(|e| ClientError::Request(e.to_string()))?;

        decode(check(response).await?).await
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(path)?)
    }
}

/// Map non-success statuses to errors, passing successful responses through.
async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let mut body: ErrorBody = response.json().await.unwrap_or_default();
    if body.message.is_empty() {
        body.message = status.canonical_reason().unwrap_or("Request failed").to_string();
    }
    warn!(status = status.as_u16(), message = %body.message, "API request rejected");

    Err(match status {
        StatusCode::NOT_FOUND => ClientError::NotFound(body.message),
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
        StatusCode::BAD_REQUEST => ClientError::Validation {
            message: body.message,
            field: body.field,
        },
        _ => ClientError::UnexpectedStatus {
            status: status.as_u16(),
            message: body.message,
        },
    })
}

async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    response
        .json()
        .await
        .map_err(|e| ClientError::Response(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_keeps_prefix() {
        let client = ApiClient::new(Url::parse("https://plants.example/shop").unwrap()).unwrap();
        assert_eq!(client.base_url().as_str(), "https://plants.example/shop/");
        assert_eq!(
            client.endpoint("api/products/3").unwrap().as_str(),
            "https://plants.example/shop/api/products/3"
        );
    }

    #[test]
    fn test_root_base_url() {
        let client = ApiClient::new(Url::parse("http://127.0.0.1:3000").unwrap()).unwrap();
        assert_eq!(
            client.endpoint("api/login").unwrap().as_str(),
            "http://127.0.0.1:3000/api/login"
        );
    }

    #[test]
    fn test_debug_shows_only_base_url() {
        let client = ApiClient::new(Url::parse("http://127.0.0.1:3000").unwrap()).unwrap();
        assert_eq!(
            format!("{client:?}"),
            "ApiClient { base_url: \"http://127.0.0.1:3000/\", .. }"
        );
    }
}
