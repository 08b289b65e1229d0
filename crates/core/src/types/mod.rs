//! Core types for the Griffin storefront.
//!
//! This module provides type-safe wrappers and records for the catalog and
//! cart domain.

pub mod cart;
pub mod id;
pub mod locale;
pub mod price;
pub mod product;
pub mod service;

pub use cart::CartItem;
pub use id::*;
pub use locale::{Locale, UnknownLocale};
pub use price::Price;
pub use product::{DEFAULT_CATEGORY, Product, ProductVariant};
pub use service::Service;
