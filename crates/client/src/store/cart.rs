//! Persisted cart state.
//!
//! Pure cart arithmetic lives in [`storekeep_core::Cart`]; this wrapper owns
//! the persistence boundary and saves after every mutation.

use std::path::PathBuf;

use storekeep_core::{Cart, CartItem, ProductId};

use super::{StoreError, keys, load_snapshot, save_snapshot};

/// Cart state with an explicit persistence boundary.
#[derive(Debug)]
pub struct CartStore {
    state_dir: PathBuf,
    cart: Cart,
}

impl CartStore {
    /// Open the store, loading any persisted cart.
    ///
    /// A corrupt snapshot is discarded with a warning; the cart starts
    /// empty.
    ///
    /// # Errors
    ///
    /// Returns an error when the snapshot exists but cannot be read.
    pub fn open(state_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let state_dir = state_dir.into();
        let cart = match load_snapshot::<Cart>(&state_dir, keys::CART) {
            Ok(cart) => cart.unwrap_or_default(),
            Err(StoreError::Corrupt { key, source }) => {
                tracing::warn!("discarding corrupt snapshot {key}: {source}");
                Cart::default()
            }
            Err(err) => return Err(err),
        };
        Ok(Self { state_dir, cart })
    }

    /// Add an item, merging quantities for an already-present product.
    ///
    /// # Errors
    ///
    /// Returns an error when the snapshot cannot be written.
    pub fn add_item(&mut self, item: CartItem) -> Result<(), StoreError> {
        self.cart.add_item(item);
        self.save()
    }

    /// Remove the line for `id`.
    ///
    /// # Errors
    ///
    /// Returns an error when the snapshot cannot be written.
    pub fn remove_item(&mut self, id: ProductId) -> Result<(), StoreError> {
        self.cart.remove_item(id);
        self.save()
    }

    /// Set the quantity for `id`; zero removes the line.
    ///
    /// # Errors
    ///
    /// Returns an error when the snapshot cannot be written.
    pub fn update_quantity(&mut self, id: ProductId, quantity: u32) -> Result<(), StoreError> {
        self.cart.update_quantity(id, quantity);
        self.save()
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns an error when the snapshot cannot be written.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.cart.clear();
        self.save()
    }

    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    fn save(&self) -> Result<(), StoreError> {
        save_snapshot(&self.state_dir, keys::CART, &self.cart)
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
    fn test_mutations_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = CartStore::open(dir.path()).unwrap();
            store.add_item(line(1, 10.0, 2)).unwrap();
            store.add_item(line(2, 5.0, 3)).unwrap();
        }

        let store = CartStore::open(dir.path()).unwrap();
        assert_eq!(store.cart().len(), 2);
        assert!((store.cart().total() - 35.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_update_quantity_zero_removes_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = CartStore::open(dir.path()).unwrap();
        store.add_item(line(1, 10.0, 2)).unwrap();

        store.update_quantity(ProductId::new(1), 0).unwrap();
        assert!(store.cart().is_empty());

        let reopened = CartStore::open(dir.path()).unwrap();
        assert!(reopened.cart().is_empty());
    }

    #[test]
    fn test_clear_persists_empty_cart() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = CartStore::open(dir.path()).unwrap();
        store.add_item(line(1, 10.0, 2)).unwrap();
        store.clear().unwrap();

        let reopened = CartStore::open(dir.path()).unwrap();
        assert!(reopened.cart().is_empty());
    }

    #[test]
    fn test_corrupt_snapshot_resets_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("cart-storage.json"), "[1,2").unwrap();

        let store = CartStore::open(dir.path()).unwrap();
        assert!(store.cart().is_empty());
    }
}
