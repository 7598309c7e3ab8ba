//! DummyJSON REST API client.
//!
//! # Architecture
//!
//! - Plain JSON-over-HTTP via `reqwest` - the upstream service is the source
//!   of truth, nothing is mirrored locally
//! - One client per process, cheap to clone (shared `Arc` inner)
//! - Callers holding a session pass its bearer token; it is attached as an
//!   `Authorization` header on every outgoing request
//!
//! # Endpoints
//!
//! - `POST /auth/login` - authenticate, returns profile + tokens
//! - `GET /products`, `GET /products/search`, `GET /products/category/{slug}` - listings
//! - `GET /products/{id}` - single product
//! - `GET /products/categories` - category index
//! - `POST /products/add`, `PUT /products/{id}` - mutations (simulated upstream)

pub mod types;

pub use types::*;

use std::sync::Arc;

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::instrument;

use storekeep_core::{Category, Product, ProductId, ProductPage};

use crate::config::Config;

const USER_AGENT: &str = "Storekeep/1.0";

/// Errors that can occur when talking to the DummyJSON API.
#[derive(Debug, Error)]
pub enum DummyJsonError {
    /// HTTP transport failed or a success body could not be decoded.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Upstream rejected the request and supplied an error message.
    #[error("upstream returned {status}: {message}")]
    Status {
        /// HTTP status code of the rejection.
        status: StatusCode,
        /// Message decoded from the `{"message": ...}` error body.
        message: String,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// Client
// ─────────────────────────────────────────────────────────────────────────────

/// Client for the DummyJSON REST API.
#[derive(Clone)]
pub struct DummyJsonClient {
    inner: Arc<DummyJsonClientInner>,
}

struct DummyJsonClientInner {
    client: reqwest::Client,
    /// Base URL, normalized by the config layer to end with `/`.
    base_url: String,
}

/// Parameters for a product listing call.
#[derive(Debug, Clone)]
pub struct ProductQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub limit: u32,
    pub skip: u64,
}

impl DummyJsonClient {
    /// Create a new client from configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            inner: Arc::new(DummyJsonClientInner {
                client: reqwest::Client::new(),
                base_url: config.api_url.to_string(),
            }),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Auth
    // ─────────────────────────────────────────────────────────────────────────

    /// Authenticate a user and obtain bearer tokens.
    ///
    /// # Errors
    ///
    /// Returns [`DummyJsonError::Status`] carrying the upstream message when
    /// the credentials are rejected.
    #[instrument(skip(self, password), fields(username = %username))]
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<LoginResponse, DummyJsonError> {
        let request = LoginRequest { username, password };

        let response = self
            .inner
            .client
            .post(self.url("auth/login"))
            .header("User-Agent", USER_AGENT)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_for(response, "Invalid credentials").await);
        }

        Ok(response.json().await?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Products
    // ─────────────────────────────────────────────────────────────────────────

    /// Fetch one page of products according to the query's selection policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the page cannot be decoded.
    #[instrument(skip(self, bearer))]
    pub async fn fetch_products(
        &self,
        query: &ProductQuery,
        bearer: Option<&SecretString>,
    ) -> Result<ProductPage, DummyJsonError> {
        let request = self.inner.client.get(self.url(&list_path(query)));
        let response = apply_auth(request, bearer)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_for(response, "failed to fetch products").await);
        }

        Ok(response.json().await?)
    }

    /// Fetch a single product by id.
    ///
    /// # Errors
    ///
    /// Returns [`DummyJsonError::NotFound`] when the id is absent upstream.
    #[instrument(skip(self, bearer, id), fields(product_id = %id))]
    pub async fn fetch_product(
        &self,
        id: ProductId,
        bearer: Option<&SecretString>,
    ) -> Result<Product, DummyJsonError> {
        let request = self.inner.client.get(self.url(&format!("products/{id}")));
        let response = apply_auth(request, bearer)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(DummyJsonError::NotFound(format!("product {id}")));
        }
        if !response.status().is_success() {
            return Err(error_for(response, "failed to fetch product").await);
        }

        Ok(response.json().await?)
    }

    /// Fetch the category index.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the list cannot be decoded.
    #[instrument(skip(self, bearer))]
    pub async fn fetch_categories(
        &self,
        bearer: Option<&SecretString>,
    ) -> Result<Vec<Category>, DummyJsonError> {
        let request = self.inner.client.get(self.url("products/categories"));
        let response = apply_auth(request, bearer)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_for(response, "failed to fetch categories").await);
        }

        Ok(response.json().await?)
    }

    /// Create a product. The upstream simulates the write and echoes the
    /// submitted fields back with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected upstream.
    #[instrument(skip(self, new_product, bearer), fields(title = %new_product.title))]
    pub async fn create_product(
        &self,
        new_product: &NewProduct,
        bearer: Option<&SecretString>,
    ) -> Result<Product, DummyJsonError> {
        let request = self.inner.client.post(self.url("products/add"));
        let response = apply_auth(request, bearer)
            .header("User-Agent", USER_AGENT)
            .json(new_product)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_for(response, "failed to create product").await);
        }

        Ok(response.json().await?)
    }

    /// Update a product. Only the fields present in the patch change.
    ///
    /// # Errors
    ///
    /// Returns [`DummyJsonError::NotFound`] when the id is absent upstream.
    #[instrument(skip(self, patch, bearer, id), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        id: ProductId,
        patch: &ProductPatch,
        bearer: Option<&SecretString>,
    ) -> Result<Product, DummyJsonError> {
        let request = self.inner.client.put(self.url(&format!("products/{id}")));
        let response = apply_auth(request, bearer)
            .header("User-Agent", USER_AGENT)
            .json(patch)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(DummyJsonError::NotFound(format!("product {id}")));
        }
        if !response.status().is_success() {
            return Err(error_for(response, "failed to update product").await);
        }

        Ok(response.json().await?)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Request plumbing
// ─────────────────────────────────────────────────────────────────────────────

/// Attach the bearer token when the caller holds a session.
fn apply_auth(
    request: reqwest::RequestBuilder,
    bearer: Option<&SecretString>,
) -> reqwest::RequestBuilder {
    match bearer {
        Some(token) => request.header(
            "Authorization",
            format!("Bearer {}", token.expose_secret()),
        ),
        None => request,
    }
}

/// Build the listing path. Selection is mutually exclusive, checked in
/// order: search wins over category, category over the plain listing. Empty
/// strings count as absent.
fn list_path(query: &ProductQuery) -> String {
    let limit = query.limit;
    let skip = query.skip;
    let search = query.search.as_deref().filter(|s| !s.is_empty());
    let category = query.category.as_deref().filter(|s| !s.is_empty());

    if let Some(q) = search {
        format!(
            "products/search?q={}&limit={limit}&skip={skip}",
            urlencoding::encode(q)
        )
    } else if let Some(slug) = category {
        format!(
            "products/category/{}?limit={limit}&skip={skip}",
            urlencoding::encode(slug)
        )
    } else {
        format!("products?limit={limit}&skip={skip}")
    }
}

/// Decode an error body of the shape `{"message": "..."}`, falling back to a
/// fixed message when the body is not in that shape.
async fn error_for(response: reqwest::Response, fallback: &str) -> DummyJsonError {
    let status = response.status();
    let message = response
        .json::<ApiMessage>()
        .await
        .map_or_else(|_| fallback.to_string(), |body| body.message);
    DummyJsonError::Status { status, message }
}
