//! Service cards shown on the services page.

use serde::{Deserialize, Serialize};

use super::id::ServiceId;
use super::locale::Locale;

/// A service offering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: ServiceId,
    pub title: String,
    #[serde(rename = "title_ar")]
    pub title_ar: String,
    pub description: String,
    #[serde(rename = "description_ar")]
    pub description_ar: String,
    pub image_src: String,
    /// Uptime figure shown on the card, 0-100.
    pub reliability_percent: u8,
    /// Anchor used to link the card to its shop entry.
    pub slug: String,
}

impl Service {
    #[must_use]
    pub fn title(&self, locale: Locale) -> &str {
        locale.pick(&self.title, &self.title_ar)
    }

    #[must_use]
    pub fn description(&self, locale: Locale) -> &str {
        locale.pick(&self.description, &self.description_ar)
    }

    /// Link to the matching shop section.
    #[must_use]
    pub fn shop_link(&self) -> String {
        format!("/shop#{}", self.slug)
    }
}
