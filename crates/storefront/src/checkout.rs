//! Simulated checkout.
//!
//! There is no payment processor behind this: placing an order waits a
//! fixed processing delay, empties the cart and hands back a confirmation.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use griffin_core::{Locale, Price};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument};

use crate::cart::CartStore;
use crate::storage::StorageError;

/// Default simulated processing time.
pub const DEFAULT_CHECKOUT_DELAY: Duration = Duration::from_secs(1);

/// Payment options offered at checkout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    #[serde(rename = "instapay")]
    InstaPay,
    SmartWallet,
    Cash,
}

impl PaymentMethod {
    pub const ALL: [Self; 3] = [Self::InstaPay, Self::SmartWallet, Self::Cash];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InstaPay => "instapay",
            Self::SmartWallet => "smart_wallet",
            Self::Cash => "cash",
        }
    }

    #[must_use]
    pub const fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::InstaPay, Locale::En) => "InstaPay",
            (Self::InstaPay, Locale::Ar) => "إنستاباي",
            (Self::SmartWallet, Locale::En) => "Smart Wallet",
            (Self::SmartWallet, Locale::Ar) => "المحفظة الذكية",
            (Self::Cash, Locale::En) => "Cash",
            (Self::Cash, Locale::Ar) => "نقدًا",
        }
    }

    #[must_use]
    pub const fn description(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::InstaPay, Locale::En) => "Instant secure online payment",
            (Self::InstaPay, Locale::Ar) => "دفع إلكتروني فوري وآمن",
            (Self::SmartWallet, Locale::En) => {
                "Pay with digital wallets (Vodafone, Etisalat, etc.)"
            }
            (Self::SmartWallet, Locale::Ar) => "ادفع بالمحافظ الرقمية (فودافون، اتصالات، إلخ)",
            (Self::Cash, Locale::En) => "Pay upon delivery",
            (Self::Cash, Locale::Ar) => "الدفع عند الاستلام",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unknown payment method.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown payment method '{0}' (expected instapay, smart_wallet or cash)")]
pub struct UnknownPaymentMethod(pub String);

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "instapay" => Ok(Self::InstaPay),
            "smart_wallet" => Ok(Self::SmartWallet),
            "cash" => Ok(Self::Cash),
            other => Err(UnknownPaymentMethod(other.to_owned())),
        }
    }
}

/// Receipt for a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    /// Order reference, `GRF-<epoch millis>`.
    pub reference: String,
    pub payment_method: PaymentMethod,
    pub item_count: u32,
    pub total: Price,
    pub placed_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("cannot check out an empty cart")]
    EmptyCart,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Places orders against a cart.
#[derive(Clone)]
pub struct CheckoutService {
    cart: CartStore,
    delay: Duration,
}

impl CheckoutService {
    #[must_use]
    pub const fn new(cart: CartStore, delay: Duration) -> Self {
        Self { cart, delay }
    }

    /// Place an order for the current cart contents and empty the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if there is nothing to buy, or a
    /// storage error if the cart cannot be cleared.
    #[instrument(skip(self))]
    pub async fn place_order(
        &self,
        payment_method: PaymentMethod,
    ) -> Result<OrderConfirmation, CheckoutError> {
        let summary = self.cart.summary();
        if summary.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        tokio::time::sleep(self.delay).await;
        self.cart.clear()?;

        let placed_at = Utc::now();
        let confirmation = OrderConfirmation {
            reference: format!("GRF-{}", placed_at.timestamp_millis()),
            payment_method,
            item_count: summary.count,
            total: summary.total,
            placed_at,
        };
        info!(
            reference = %confirmation.reference,
            %payment_method,
            items = confirmation.item_count,
            total = %confirmation.total,
            "Order placed"
        );
        Ok(confirmation)
    }
}
