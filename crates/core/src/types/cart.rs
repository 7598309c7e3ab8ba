//! Client-side shopping cart.
//!
//! The cart lives entirely on the client and never touches the upstream
//! API. Each line carries a denormalized snapshot of its product so the cart
//! can render without refetching.

use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;

/// A single cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub title: String,
    /// Unit price at the time the product was added.
    pub price: f64,
    pub quantity: u32,
    #[serde(default)]
    pub thumbnail: String,
}

/// An ordered list of cart lines, at most one per product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Add an item, merging quantities when the product is already present.
    pub fn add_item(&mut self, item: CartItem) {
        if let Some(line) = self.items.iter_mut().find(|line| line.id == item.id) {
            line.quantity = line.quantity.saturating_add(item.quantity);
        } else {
            self.items.push(item);
        }
    }

    /// Remove the line for `id`. Unknown ids are a no-op.
    pub fn remove_item(&mut self, id: ProductId) {
        self.items.retain(|line| line.id != id);
    }

    /// Set the quantity for `id`. Zero removes the line.
    pub fn update_quantity(&mut self, id: ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove_item(id);
        } else if let Some(line) = self.items.iter_mut().find(|line| line.id == id) {
            line.quantity = quantity;
        }
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of `price * quantity` across all lines.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.items
            .iter()
            .map(|line| line.price * f64::from(line.quantity))
            .sum()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn line(id: u64, price: f64, quantity: u32) -> CartItem {
        CartItem {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price,
            quantity,
            thumbnail: String::new(),
        }
    }

    #[test]
    fn test_add_item_merges_quantities_for_same_product() {
        let mut cart = Cart::default();
        cart.add_item(line(1, 10.0, 2));
        cart.add_item(line(1, 10.0, 3));

        assert_eq!(cart.len(), 1);
        let only = cart.items.first().unwrap();
        assert_eq!(only.quantity, 5);
    }

    #[test]
    fn test_update_quantity_zero_removes_line() {
        let mut cart = Cart::default();
        cart.add_item(line(1, 10.0, 2));
        cart.update_quantity(ProductId::new(1), 0);

        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_replaces_count() {
        let mut cart = Cart::default();
        cart.add_item(line(1, 10.0, 2));
        cart.update_quantity(ProductId::new(1), 7);

        assert_eq!(cart.total_quantity(), 7);
    }

    #[test]
    fn test_total_sums_price_times_quantity() {
        let mut cart = Cart::default();
        cart.add_item(line(1, 10.0, 2));
        cart.add_item(line(2, 15.0, 1));

        assert!((cart.total() - 35.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut cart = Cart::default();
        cart.add_item(line(1, 10.0, 2));
        cart.remove_item(ProductId::new(99));

        assert_eq!(cart.len(), 1);
    }
}
