//! Charcoal Core - Shared types library.
//!
//! This crate provides the canonical domain model used across all Charcoal
//! components:
//! - `storefront` - Headless client for the customer-facing site
//! - `integration-tests` - End-to-end tests against the bundled datasets
//!
//! # Architecture
//!
//! The core crate contains only types and pure helpers - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, money helpers, and the canonical menu,
//!   cart, site-content, and order models

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
