//! Griffin storefront library.
//!
//! The data layer behind the bilingual storefront: a persisted shopping
//! cart, the product and service catalog (local demo data combined with an
//! optional WooCommerce store), simulated checkout and form validation.
//!
//! # Example
//!
//! ```rust,ignore
//! use griffin_storefront::{Storefront, config::StorefrontConfig};
//!
//! let storefront = Storefront::open(StorefrontConfig::from_env()?)?;
//! storefront.initialize()?;
//!
//! let catalog = storefront.catalog().products().await;
//! let product = &catalog.products[0];
//! storefront.cart().add(product, &product.variants[0], 1)?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod state;
pub mod storage;
pub mod validation;
pub mod woocommerce;

pub use error::{AppError, Result};
pub use state::Storefront;
