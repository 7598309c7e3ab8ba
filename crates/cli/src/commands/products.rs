//! Product catalog commands.
//!
//! # Usage
//!
//! ```bash
//! # First page with the configured page size
//! storekeep products list
//!
//! # Search takes precedence when a category is also given
//! storekeep products list --search phone --category smartphones
//!
//! # Walk every page
//! storekeep products list --category furniture --all
//!
//! # Price bounds apply to each fetched page, not the whole catalog
//! storekeep products list --min-price 10 --max-price 50
//!
//! # Single product, category index
//! storekeep products show 1
//! storekeep categories
//!
//! # Mutations (DummyJSON simulates them; nothing persists upstream)
//! storekeep products add --title "Oak Shelf" --description "Solid oak wall shelf" --price 79.5
//! storekeep products update 1 --price 599
//! ```

use storekeep_client::catalog::Pager;
use storekeep_client::gateway::{CreateProductInput, ListProductsInput, UpdateProductInput};
use storekeep_core::{FilterCriteria, Product, ProductId, ProductPage};

use super::{App, CommandError};

/// List products, one page by default or the whole catalog with `all`.
pub async fn list(
    search: Option<String>,
    category: Option<String>,
    min_price: Option<f64>,
    max_price: Option<f64>,
    all: bool,
) -> Result<(), CommandError> {
    let app = App::from_env()?;
    app.require_session()?;
    let ctx = app.context();

    let mut criteria = FilterCriteria::default();
    if let Some(search) = search {
        criteria.set_search(search);
    }
    if let Some(category) = category {
        criteria.set_category(category);
    }
    criteria.set_price_range(min_price, max_price);

    let mut pager = Pager::new(app.config.page_size);
    let mut shown: u64 = 0;

    while let Some(skip) = pager.begin_fetch() {
        let input = ListProductsInput::from_criteria(&criteria, pager.limit(), skip);
        let page = match app.gateway.list_products(&ctx, input).await {
            Ok(page) => page,
            Err(err) => {
                pager.abort_fetch();
                return Err(err.into());
            }
        };

        print_page(&page, skip);
        shown += page.products.len() as u64;

        // A page filtered down to nothing also reports total 0, which stops
        // the pager; breaking here keeps --all from spinning regardless.
        let drained = page.products.is_empty();
        pager.complete_fetch(page.products.len(), page.total);

        if !all || drained {
            break;
        }
    }

    tracing::info!("{shown} product(s) shown");
    Ok(())
}

/// Show a single product.
pub async fn show(id: ProductId) -> Result<(), CommandError> {
    let app = App::from_env()?;
    app.require_session()?;

    let product = app.gateway.get_product(&app.context(), id).await?;
    print_detail(&product);
    Ok(())
}

/// Create a product.
pub async fn add(
    title: String,
    description: String,
    price: f64,
    category: Option<String>,
) -> Result<(), CommandError> {
    let app = App::from_env()?;
    app.require_session()?;

    let input = CreateProductInput {
        title,
        description,
        price,
        category,
    };
    let product = app.gateway.create_product(&app.context(), input).await?;

    tracing::info!("Created product #{}: {}", product.id, product.title);
    Ok(())
}

/// Update a product. Absent options leave the field untouched.
pub async fn update(
    id: ProductId,
    title: Option<String>,
    description: Option<String>,
    price: Option<f64>,
    category: Option<String>,
) -> Result<(), CommandError> {
    let app = App::from_env()?;
    app.require_session()?;

    let input = UpdateProductInput {
        id,
        title,
        description,
        price,
        category,
    };
    let product = app.gateway.update_product(&app.context(), input).await?;

    tracing::info!("Updated product #{}: {}", product.id, product.title);
    Ok(())
}

/// List the category index.
pub async fn categories() -> Result<(), CommandError> {
    let app = App::from_env()?;
    app.require_session()?;

    let categories = app.gateway.categories(&app.context()).await?;

    tracing::info!("{} categories", categories.len());
    for category in &categories {
        tracing::info!("  {:<28} {}", category.slug, category.name);
    }
    Ok(())
}

fn print_page(page: &ProductPage, skip: u64) {
    let through = skip + page.products.len() as u64;
    tracing::info!("Products {skip}..{through} of {}", page.total);
    for product in &page.products {
        let tag = format!("#{}", product.id);
        tracing::info!(
            "  {tag:<6} {:<42} ${:>9.2}  stock {:>4}  {}",
            product.title,
            product.price,
            product.stock,
            product.category
        );
    }
}

fn print_detail(product: &Product) {
    tracing::info!("#{} {}", product.id, product.title);
    if let Some(brand) = &product.brand {
        tracing::info!("  brand:    {brand}");
    }
    tracing::info!("  category: {}", product.category);
    tracing::info!("  price:    ${:.2}", product.price);
    tracing::info!("  stock:    {}", product.stock);
    tracing::info!("  rating:   {:.2}", product.rating);
    if !product.description.is_empty() {
        tracing::info!("  {}", product.description);
    }
}
