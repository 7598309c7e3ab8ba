//! Core types for Storekeep.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod filters;
pub mod id;
pub mod product;
pub mod user;

pub use cart::{Cart, CartItem};
pub use filters::FilterCriteria;
pub use id::*;
pub use product::{Category, Product, ProductPage};
pub use user::UserProfile;
