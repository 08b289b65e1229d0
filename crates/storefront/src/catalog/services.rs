//! Service cards, optionally extended with remote catalog items.

use griffin_core::{Service, ServiceId};

use crate::woocommerce::RemoteProduct;

/// Image shown on remote service cards without an image.
pub const SERVICE_PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// Reliability shown on remote service cards, which carry no such figure.
pub const REMOTE_RELIABILITY_PERCENT: u8 = 90;

/// Present a remote product as a service card.
#[must_use]
pub fn service_from_remote(remote: &RemoteProduct) -> Service {
    let product = &remote.product;
    let description = if product.short_description.is_empty() {
        product.description.clone()
    } else {
        product.short_description.clone()
    };
    let image_src = product
        .images
        .first()
        .map(|image| image.src.clone())
        .filter(|src| !src.is_empty())
        .unwrap_or_else(|| SERVICE_PLACEHOLDER_IMAGE.to_owned());

    Service {
        id: ServiceId::new(product.id.to_string()),
        title: product.name.clone(),
        title_ar: product.name.clone(),
        description_ar: description.clone(),
        description,
        image_src,
        reliability_percent: REMOTE_RELIABILITY_PERCENT,
        slug: format!("woo-product-{}", product.id),
    }
}

/// Local services followed by one card per remote product.
#[must_use]
pub fn merge_services(local: &[Service], remote: &[RemoteProduct]) -> Vec<Service> {
    local
        .iter()
        .cloned()
        .chain(remote.iter().map(service_from_remote))
        .collect()
}
