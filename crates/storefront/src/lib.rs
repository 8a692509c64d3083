//! Charcoal storefront client library.
//!
//! Session-scoped state containers for a restaurant storefront: the cart,
//! the menu catalog, and editorial site content, plus order submission and
//! an optional in-RAM search index over the catalog. Everything here is
//! headless; rendering and routing live elsewhere.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod client;
pub mod config;
pub mod content;
pub mod error;
pub mod menu;
pub mod order;
pub mod search;
pub mod state;
