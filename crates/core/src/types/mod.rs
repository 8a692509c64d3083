//! Core types for Charcoal.
//!
//! This module provides type-safe wrappers and the canonical domain model
//! shared by every Charcoal component.

pub mod cart;
pub mod content;
pub mod id;
pub mod menu;
pub mod order;
pub mod price;

pub use cart::CartLine;
pub use content::*;
pub use id::*;
pub use menu::{Dietary, MenuCategory, MenuItem, Nutrition};
pub use order::{CustomerInfo, OrderPayload, OrderType, OrderedItem};
pub use price::{format_money, parse_money};
