//! WooCommerce connection commands.

#![allow(clippy::print_stdout)]

use griffin_storefront::woocommerce::WooCommerceConfig;
use griffin_storefront::{Result, Storefront};

/// Validate and store new credentials.
///
/// # Errors
///
/// Returns an error if the input is rejected or cannot be stored.
pub fn configure(storefront: &Storefront, site_url: &str, key: &str, secret: &str) -> Result<()> {
    let config = WooCommerceConfig::parse(site_url, key, secret)?;
    storefront.configure_remote(&config)?;
    println!("Connected to {}.", config.site_url);
    Ok(())
}

pub fn show(storefront: &Storefront) {
    match storefront.woo_settings().load() {
        Some(config) => {
            println!("Site: {}", config.site_url);
            println!("Consumer key: [REDACTED]");
            println!("Consumer secret: [REDACTED]");
        }
        None => println!("No WooCommerce store configured."),
    }
}

/// # Errors
///
/// Returns an error if the stored settings cannot be removed.
pub fn clear(storefront: &Storefront) -> Result<()> {
    storefront.disconnect_remote()?;
    println!("WooCommerce connection removed.");
    Ok(())
}
