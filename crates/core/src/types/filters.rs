//! Catalog filter state.
//!
//! Filters are deliberately ephemeral. They reset whenever the process
//! restarts, unlike the session and cart which persist to disk.

use serde::{Deserialize, Serialize};

/// The active catalog filters.
///
/// Empty strings normalize to `None` so "no filter" has exactly one
/// representation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub search: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl FilterCriteria {
    /// Set the free-text search query. Empty input clears it.
    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        self.search = if search.is_empty() { None } else { Some(search) };
    }

    /// Select a category by slug. Empty input clears it.
    pub fn set_category(&mut self, category: impl Into<String>) {
        let category = category.into();
        self.category = if category.is_empty() {
            None
        } else {
            Some(category)
        };
    }

    /// Bound the price range. Either end may stay open.
    pub fn set_price_range(&mut self, min: Option<f64>, max: Option<f64>) {
        self.min_price = min;
        self.max_price = max;
    }

    /// Reset every filter to its default.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether no filter is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search.is_none()
            && self.category.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_search_normalizes_to_none() {
        let mut filters = FilterCriteria::default();
        filters.set_search("desk");
        assert_eq!(filters.search.as_deref(), Some("desk"));

        filters.set_search("");
        assert_eq!(filters.search, None);
    }

    #[test]
    fn test_clear_resets_all_filters() {
        let mut filters = FilterCriteria::default();
        filters.set_search("desk");
        filters.set_category("furniture");
        filters.set_price_range(Some(10.0), Some(500.0));

        filters.clear();
        assert!(filters.is_empty());
        assert_eq!(filters, FilterCriteria::default());
    }
}
