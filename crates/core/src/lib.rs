//! Griffin Core - Shared types library.
//!
//! This crate provides common types used across all Griffin components:
//! - `storefront` - Cart, catalog, and remote-catalog data layer
//! - `cli` - Command-line tools for operating a local store
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, locales, products, cart rows, services

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
