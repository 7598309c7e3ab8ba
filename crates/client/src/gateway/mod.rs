//! Typed RPC gateway over the DummyJSON API.
//!
//! # Architecture
//!
//! - Every procedure is statically declared: dotted path plus auth
//!   requirement (see [`procedures`])
//! - Inputs validate against their schema before anything reaches the
//!   upstream client
//! - Protected procedures fail `Unauthorized` when the context carries no
//!   user, again before any network traffic
//! - Every dispatch is logged with its procedure path and a fresh
//!   correlation id
//!
//! # Request lifecycle
//!
//! One async call per request: pending while awaited, then success or a
//! typed failure, terminal either way. The gateway never retries; retry
//! policy, if any, belongs to the caller.

pub mod schema;

pub use schema::*;

use secrecy::SecretString;
use thiserror::Error;
use tracing::instrument;
use uuid::Uuid;

use storekeep_core::{Category, Product, ProductId, ProductPage, UserId};

use crate::dummyjson::{
    DummyJsonClient, DummyJsonError, LoginResponse, NewProduct, ProductPatch, ProductQuery,
};
use crate::store::Session;

// ─────────────────────────────────────────────────────────────────────────────
// Procedure declarations
// ─────────────────────────────────────────────────────────────────────────────

/// A statically declared procedure: its dotted path and auth requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Procedure {
    /// Dotted RPC path, e.g. `products.create`.
    pub path: &'static str,
    /// Whether a session user must be present in the context.
    pub protected: bool,
}

/// The full procedure surface.
pub mod procedures {
    use super::Procedure;

    /// Authenticate with username/password.
    pub const AUTH_LOGIN: Procedure = Procedure {
        path: "auth.login",
        protected: false,
    };

    /// List products with optional search/category/price filters.
    pub const PRODUCTS_LIST: Procedure = Procedure {
        path: "products.list",
        protected: false,
    };

    /// Fetch a single product by id.
    pub const PRODUCTS_GET: Procedure = Procedure {
        path: "products.get",
        protected: false,
    };

    /// Fetch the category index.
    pub const PRODUCTS_CATEGORIES: Procedure = Procedure {
        path: "products.categories",
        protected: false,
    };

    /// Create a product.
    pub const PRODUCTS_CREATE: Procedure = Procedure {
        path: "products.create",
        protected: true,
    };

    /// Update a product.
    pub const PRODUCTS_UPDATE: Procedure = Procedure {
        path: "products.update",
        protected: true,
    };

    /// Liveness check, answered locally.
    pub const HEALTH: Procedure = Procedure {
        path: "health",
        protected: false,
    };

    /// Every procedure the gateway exposes.
    pub const ALL: &[Procedure] = &[
        AUTH_LOGIN,
        PRODUCTS_LIST,
        PRODUCTS_GET,
        PRODUCTS_CATEGORIES,
        PRODUCTS_CREATE,
        PRODUCTS_UPDATE,
        HEALTH,
    ];
}

// ─────────────────────────────────────────────────────────────────────────────
// Execution context
// ─────────────────────────────────────────────────────────────────────────────

/// The authenticated caller, as the session middleware would inject it.
///
/// Implements `Debug` manually to redact the bearer token.
#[derive(Clone)]
pub struct CurrentUser {
    pub id: UserId,
    pub username: String,
    /// Bearer token propagated to every upstream call.
    pub token: SecretString,
}

impl std::fmt::Debug for CurrentUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurrentUser")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Per-call execution context.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Present when the caller holds a session.
    pub user: Option<CurrentUser>,
}

impl Context {
    /// Context for an anonymous caller.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { user: None }
    }

    /// The context a stored session implies.
    #[must_use]
    pub fn from_session(session: Option<&Session>) -> Self {
        Self {
            user: session.map(|session| CurrentUser {
                id: session.user.id,
                username: session.user.username.clone(),
                token: session.token.clone(),
            }),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Errors surfaced by gateway procedures.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Input failed schema validation; carries field-level issues.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Protected call without a session, or rejected credentials.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Resource absent upstream.
    #[error("not found: {0}")]
    NotFound(String),

    /// Unexpected upstream or transport failure, sanitized.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Map an upstream product-endpoint failure into the gateway taxonomy. The
/// upstream detail goes to the log; callers see the sanitized fallback.
fn map_upstream_error(err: DummyJsonError, fallback: &str) -> GatewayError {
    match err {
        DummyJsonError::NotFound(_) => GatewayError::NotFound("Product not found".to_string()),
        other => {
            tracing::warn!("upstream failure: {other}");
            GatewayError::Internal(fallback.to_string())
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Gateway
// ─────────────────────────────────────────────────────────────────────────────

/// The typed RPC gateway.
///
/// Validates and authorizes each call, then forwards it to the upstream
/// client and maps the result back into typed errors.
#[derive(Clone)]
pub struct Gateway {
    client: DummyJsonClient,
}

/// Log the dispatch and enforce the auth requirement. Runs before every
/// handler, so a rejection here proves no upstream call was attempted.
fn enter(procedure: Procedure, ctx: &Context) -> Result<(), GatewayError> {
    let call_id = Uuid::new_v4();
    tracing::info!(procedure = procedure.path, %call_id, "dispatch");

    if procedure.protected && ctx.user.is_none() {
        tracing::warn!(procedure = procedure.path, %call_id, "rejected: no session user");
        return Err(GatewayError::Unauthorized(
            "You must be logged in to access this resource".to_string(),
        ));
    }
    Ok(())
}

fn bearer(ctx: &Context) -> Option<&SecretString> {
    ctx.user.as_ref().map(|user| &user.token)
}

impl Gateway {
    /// Create a gateway over an upstream client.
    #[must_use]
    pub const fn new(client: DummyJsonClient) -> Self {
        Self { client }
    }

    /// `auth.login`: authenticate and return the upstream profile + tokens.
    ///
    /// # Errors
    ///
    /// `Validation` for empty credentials, `Unauthorized` when upstream
    /// rejects them, `Internal` when the service cannot be reached.
    #[instrument(skip(self, ctx, input), fields(username = %input.username))]
    pub async fn login(
        &self,
        ctx: &Context,
        input: LoginInput,
    ) -> Result<LoginResponse, GatewayError> {
        enter(procedures::AUTH_LOGIN, ctx)?;
        input.validate()?;

        match self.client.login(&input.username, &input.password).await {
            Ok(response) => Ok(response),
            Err(DummyJsonError::Status { message, .. }) => {
                Err(GatewayError::Unauthorized(message))
            }
            Err(err) => {
                tracing::warn!("login transport failure: {err}");
                Err(GatewayError::Internal("Failed to authenticate".to_string()))
            }
        }
    }

    /// `products.list`: one page of products, post-filtered by price.
    ///
    /// When price bounds are present they are applied over the returned page
    /// only and `total` is overwritten with the post-filtered count for that
    /// page; cross-page totals are not corrected.
    ///
    /// # Errors
    ///
    /// `Validation` for an out-of-range limit, `Internal` on upstream
    /// failure.
    #[instrument(skip(self, ctx))]
    pub async fn list_products(
        &self,
        ctx: &Context,
        input: ListProductsInput,
    ) -> Result<ProductPage, GatewayError> {
        enter(procedures::PRODUCTS_LIST, ctx)?;
        input.validate()?;

        let query = ProductQuery {
            search: input.search.clone(),
            category: input.category.clone(),
            limit: input.limit(),
            skip: input.skip(),
        };
        let mut page = self
            .client
            .fetch_products(&query, bearer(ctx))
            .await
            .map_err(|err| map_upstream_error(err, "Failed to fetch products"))?;

        apply_price_filter(&mut page, input.min_price, input.max_price);
        Ok(page)
    }

    /// `products.get`: a single product.
    ///
    /// # Errors
    ///
    /// `NotFound` when the id is absent upstream, `Internal` otherwise.
    #[instrument(skip(self, ctx, id), fields(product_id = %id))]
    pub async fn get_product(&self, ctx: &Context, id: ProductId) -> Result<Product, GatewayError> {
        enter(procedures::PRODUCTS_GET, ctx)?;

        self.client
            .fetch_product(id, bearer(ctx))
            .await
            .map_err(|err| map_upstream_error(err, "Failed to fetch product"))
    }

    /// `products.categories`: the category index.
    ///
    /// # Errors
    ///
    /// `Internal` on upstream failure.
    #[instrument(skip(self, ctx))]
    pub async fn categories(&self, ctx: &Context) -> Result<Vec<Category>, GatewayError> {
        enter(procedures::PRODUCTS_CATEGORIES, ctx)?;

        self.client
            .fetch_categories(bearer(ctx))
            .await
            .map_err(|err| map_upstream_error(err, "Failed to fetch categories"))
    }

    /// `products.create` (protected): create a product.
    ///
    /// # Errors
    ///
    /// `Unauthorized` without a session, `Validation` for bad fields,
    /// `Internal` on upstream failure.
    #[instrument(skip(self, ctx, input), fields(title = %input.title))]
    pub async fn create_product(
        &self,
        ctx: &Context,
        input: CreateProductInput,
    ) -> Result<Product, GatewayError> {
        enter(procedures::PRODUCTS_CREATE, ctx)?;
        input.validate()?;

        let new_product = NewProduct {
            title: input.title,
            description: input.description,
            price: input.price,
            category: input.category,
        };
        self.client
            .create_product(&new_product, bearer(ctx))
            .await
            .map_err(|err| map_upstream_error(err, "Failed to create product"))
    }

    /// `products.update` (protected): patch a product.
    ///
    /// # Errors
    ///
    /// `Unauthorized` without a session, `Validation` for bad fields,
    /// `NotFound` when the id is absent upstream, `Internal` otherwise.
    #[instrument(skip(self, ctx, input), fields(product_id = %input.id))]
    pub async fn update_product(
        &self,
        ctx: &Context,
        input: UpdateProductInput,
    ) -> Result<Product, GatewayError> {
        enter(procedures::PRODUCTS_UPDATE, ctx)?;
        input.validate()?;

        let patch = ProductPatch {
            title: input.title,
            description: input.description,
            price: input.price,
            category: input.category,
        };
        self.client
            .update_product(input.id, &patch, bearer(ctx))
            .await
            .map_err(|err| map_upstream_error(err, "Failed to update product"))
    }

    /// `health`: liveness check, answered locally without an upstream call.
    ///
    /// # Errors
    ///
    /// Never fails today; the `Result` keeps the procedure signature uniform.
    pub fn health(&self, ctx: &Context) -> Result<&'static str, GatewayError> {
        enter(procedures::HEALTH, ctx)?;
        Ok("OK")
    }
}

/// Apply the price bounds over the returned page and overwrite `total` with
/// the surviving count. The correction covers this page only, so `total`
/// stops matching the true cross-page count while price filters are active.
fn apply_price_filter(page: &mut ProductPage, min_price: Option<f64>, max_price: Option<f64>) {
    if min_price.is_none() && max_price.is_none() {
        return;
    }
    page.products.retain(|product| {
        min_price.is_none_or(|min| product.price >= min)
            && max_price.is_none_or(|max| product.price <= max)
    });
    page.total = page.products.len() as u64;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::Config;
    use storekeep_core::UserProfile;

    /// Gateway pointed at an unroutable address: any request that actually
    /// goes out fails as a transport error, so a `Validation` or
    /// `Unauthorized` result proves the guard fired before the network.
    fn offline_gateway() -> Gateway {
        let config = Config {
            api_url: url::Url::parse("http://127.0.0.1:1/").unwrap(),
            state_dir: std::env::temp_dir(),
            page_size: 12,
        };
        Gateway::new(DummyJsonClient::new(&config))
    }

    fn signed_in() -> Context {
        Context {
            user: Some(CurrentUser {
                id: UserId::new(1),
                username: "emilys".to_string(),
                token: SecretString::from("token-value"),
            }),
        }
    }

    fn valid_create_input() -> CreateProductInput {
        CreateProductInput {
            title: "Walnut Desk".to_string(),
            description: "A sturdy desk made of walnut.".to_string(),
            price: 249.5,
            category: None,
        }
    }

    fn priced_product(id: u64, price: f64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            description: String::new(),
            category: String::new(),
            price,
            stock: 0,
            rating: 0.0,
            thumbnail: String::new(),
            brand: None,
        }
    }

    #[tokio::test]
    async fn test_protected_call_without_session_fails_before_upstream() {
        let gateway = offline_gateway();
        let err = gateway
            .create_product(&Context::anonymous(), valid_create_input())
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_protected_call_with_session_reaches_upstream() {
        // Same unroutable endpoint: with a user present the guard passes and
        // the transport failure surfaces as a sanitized internal error.
        let gateway = offline_gateway();
        let err = gateway
            .create_product(&signed_in(), valid_create_input())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            GatewayError::Internal(message) if message == "Failed to create product"
        ));
    }

    #[tokio::test]
    async fn test_validation_failure_short_circuits() {
        let gateway = offline_gateway();
        let err = gateway
            .login(
                &Context::anonymous(),
                LoginInput {
                    username: String::new(),
                    password: String::new(),
                },
            )
            .await
            .unwrap_err();

        let GatewayError::Validation(validation) = err else {
            panic!("expected a validation error");
        };
        assert_eq!(validation.issues.len(), 2);
    }

    #[tokio::test]
    async fn test_update_accepts_empty_patch_as_input() {
        let gateway = offline_gateway();
        let err = gateway
            .update_product(&signed_in(), UpdateProductInput::for_id(ProductId::new(1)))
            .await
            .unwrap_err();

        // Validation passed; only the transport failed.
        assert!(matches!(err, GatewayError::Internal(_)));
    }

    #[test]
    fn test_health_answers_locally() {
        let gateway = offline_gateway();
        assert_eq!(gateway.health(&Context::anonymous()).unwrap(), "OK");
    }

    #[test]
    fn test_price_filter_overwrites_total_for_current_page_only() {
        let mut page = ProductPage {
            products: vec![
                priced_product(1, 5.0),
                priced_product(2, 15.0),
                priced_product(3, 25.0),
            ],
            total: 194,
            skip: 0,
            limit: 3,
        };
        apply_price_filter(&mut page, Some(10.0), Some(20.0));

        assert_eq!(page.products.len(), 1);
        // The reported total now reflects this page alone, not all pages.
        assert_eq!(page.total, 1);
    }

    #[test]
    fn test_price_filter_absent_keeps_reported_total() {
        let mut page = ProductPage {
            products: vec![priced_product(1, 5.0)],
            total: 194,
            skip: 0,
            limit: 1,
        };
        apply_price_filter(&mut page, None, None);

        assert_eq!(page.total, 194);
    }

    #[test]
    fn test_procedure_declarations() {
        assert!(procedures::PRODUCTS_CREATE.protected);
        assert!(procedures::PRODUCTS_UPDATE.protected);
        assert!(!procedures::AUTH_LOGIN.protected);
        assert!(!procedures::PRODUCTS_LIST.protected);
        assert_eq!(procedures::ALL.len(), 7);
    }

    #[test]
    fn test_current_user_debug_redacts_token() {
        let user = CurrentUser {
            id: UserId::new(1),
            username: "emilys".to_string(),
            token: SecretString::from("super-secret-token"),
        };
        let debug_output = format!("{user:?}");

        assert!(debug_output.contains("emilys"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super-secret-token"));
    }

    #[test]
    fn test_context_from_session() {
        let session = Session {
            token: SecretString::from("token-value"),
            user: UserProfile {
                id: UserId::new(7),
                username: "emilys".to_string(),
                email: "e@x".to_string(),
                first_name: "Emily".to_string(),
                last_name: "Johnson".to_string(),
                gender: String::new(),
                image: String::new(),
            },
        };
        let ctx = Context::from_session(Some(&session));
        assert_eq!(ctx.user.as_ref().map(|u| u.id), Some(UserId::new(7)));

        let ctx = Context::from_session(None);
        assert!(ctx.user.is_none());
    }
}
