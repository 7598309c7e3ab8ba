//! Storekeep Core - Shared types library.
//!
//! This crate provides common types used across all Storekeep components:
//! - `client` - Typed gateway, upstream API client, and persistent stores
//! - `cli` - Command-line admin dashboard
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, products, the cart, and filter state

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
