//! Product catalog types mirroring the upstream wire format.
//!
//! The upstream API speaks camelCase JSON and echoes back only the fields it
//! was given on create, so most product fields carry serde defaults.

use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;

/// A single product as returned by the catalog API.
///
/// Create responses contain only the submitted fields plus the assigned id,
/// so everything except `id` and `title` falls back to a default when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub rating: f64,
    /// Preview image URL.
    #[serde(default)]
    pub thumbnail: String,
    /// Not every upstream product carries a brand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

/// One page of products together with pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    /// Total number of matching products upstream, not just on this page.
    pub total: u64,
    /// Offset this page starts at.
    pub skip: u64,
    /// Maximum number of products in this page.
    pub limit: u64,
}

/// A catalog category entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// URL-safe identifier used in category endpoints.
    pub slug: String,
    /// Human-readable name.
    pub name: String,
    /// Upstream listing URL for the category.
    pub url: String,
}
