//! Cart commands.
//!
//! The cart lives entirely in local state, exactly like its browser
//! predecessor: checkout never talks to the API. Only `cart add` goes
//! upstream, to fetch the product it is about to snapshot.
//!
//! # Usage
//!
//! ```bash
//! storekeep cart add 1 --qty 2
//! storekeep cart show
//! storekeep cart set 1 5
//! storekeep cart remove 1
//! storekeep cart checkout
//! ```

use storekeep_client::store::CartStore;
use storekeep_core::{CartItem, ProductId};

use super::{App, CommandError};

/// Print the cart contents and total.
pub fn show() -> Result<(), CommandError> {
    let app = App::from_env()?;
    app.require_session()?;

    let store = CartStore::open(app.config.state_dir.clone())?;
    let cart = store.cart();

    if cart.is_empty() {
        tracing::info!("The cart is empty");
        return Ok(());
    }

    for item in &cart.items {
        let tag = format!("#{}", item.id);
        tracing::info!(
            "  {tag:<6} {:<42} {:>3} x ${:>8.2} = ${:>9.2}",
            item.title,
            item.quantity,
            item.price,
            item.price * f64::from(item.quantity)
        );
    }
    tracing::info!(
        "{} item(s), total ${:.2}",
        cart.total_quantity(),
        cart.total()
    );
    Ok(())
}

/// Fetch a product and add it to the cart.
///
/// Stores the snapshot the dashboard's product card passed along: id,
/// title, price, and thumbnail.
pub async fn add(id: ProductId, qty: u32) -> Result<(), CommandError> {
    if qty == 0 {
        return Err(CommandError::ZeroQuantity);
    }

    let app = App::from_env()?;
    app.require_session()?;

    let product = app.gateway.get_product(&app.context(), id).await?;

    let mut store = CartStore::open(app.config.state_dir.clone())?;
    store.add_item(CartItem {
        id: product.id,
        title: product.title.clone(),
        price: product.price,
        quantity: qty,
        thumbnail: product.thumbnail,
    })?;

    tracing::info!(
        "Added {qty} x {} (cart total ${:.2})",
        product.title,
        store.cart().total()
    );
    Ok(())
}

/// Remove a line from the cart.
pub fn remove(id: ProductId) -> Result<(), CommandError> {
    let app = App::from_env()?;
    app.require_session()?;

    let mut store = CartStore::open(app.config.state_dir.clone())?;
    store.remove_item(id)?;

    tracing::info!("Removed #{id} from the cart");
    Ok(())
}

/// Overwrite a line's quantity. Zero removes the line.
pub fn set_quantity(id: ProductId, qty: u32) -> Result<(), CommandError> {
    let app = App::from_env()?;
    app.require_session()?;

    let mut store = CartStore::open(app.config.state_dir.clone())?;
    store.update_quantity(id, qty)?;

    if qty == 0 {
        tracing::info!("Removed #{id} from the cart");
    } else {
        tracing::info!("Set #{id} to quantity {qty}");
    }
    Ok(())
}

/// Empty the cart.
pub fn clear() -> Result<(), CommandError> {
    let app = App::from_env()?;
    app.require_session()?;

    let mut store = CartStore::open(app.config.state_dir.clone())?;
    store.clear()?;

    tracing::info!("Cart cleared");
    Ok(())
}

/// Simulated checkout: requires a non-empty cart, then clears it.
pub fn checkout() -> Result<(), CommandError> {
    let app = App::from_env()?;
    app.require_session()?;

    let mut store = CartStore::open(app.config.state_dir.clone())?;
    if store.cart().is_empty() {
        return Err(CommandError::EmptyCart);
    }

    let items = store.cart().total_quantity();
    let total = store.cart().total();
    store.clear()?;

    tracing::info!("Order placed: {items} item(s), ${total:.2}");
    Ok(())
}
