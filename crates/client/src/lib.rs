//! Storekeep client library.
//!
//! The engine behind the `storekeep` CLI: configuration, the DummyJSON
//! upstream client, the typed RPC gateway, the persisted session and cart
//! stores, and the pagination helper.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod dummyjson;
pub mod gateway;
pub mod store;
