//! Service card commands.

#![allow(clippy::print_stdout)]

use griffin_core::Locale;
use griffin_storefront::Storefront;

/// List service cards with their shop links.
pub async fn list(storefront: &Storefront, locale: Locale) {
    let catalog = storefront.catalog().services().await;
    println!("Source: {}", catalog.origin);
    for service in &catalog.services {
        println!(
            "{:<24} {:>3}%  {}",
            service.title(locale),
            service.reliability_percent,
            service.shop_link()
        );
        println!("    {}", service.description(locale));
    }
}
