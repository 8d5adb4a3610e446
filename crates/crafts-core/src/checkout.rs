//! # Checkout Summary
//!
//! Combines a product line with a [`ShippingEstimate`] into the totals the
//! checkout page shows.
//!
//! ## Totals
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  subtotal = unit price × quantity                                       │
//! │                                                                         │
//! │  shipping   Free        → total = subtotal          (final)             │
//! │             Amount(x)   → total = subtotal + x      (final)             │
//! │             Unknown     → total = subtotal + ?      (NOT final)         │
//! │                                                                         │
//! │  An unknown shipping line is never rendered or charged as zero.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{MarketProduct, ShippingEstimate};
use crate::validation::{validate_price, validate_quantity};

/// Goods value of `quantity` units, used for free-shipping thresholds.
pub fn order_value(unit_price: Money, quantity: u32) -> CoreResult<Money> {
    unit_price.multiply_quantity(i64::from(quantity))
}

/// One product line at checkout plus its shipping state.
///
/// ## Design Notes
/// - Product name, price and subtotal are frozen when the summary is built,
///   so the page stays consistent if the listing changes mid-checkout.
/// - `shipping` is replaced every time the calculator reports a new estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub product_id: String,
    pub product_name: String,
    pub unit_price: Money,
    pub quantity: u32,
    /// `unit_price × quantity`, computed once with overflow checks.
    pub subtotal: Money,
    pub currency: String,
    pub shipping: ShippingEstimate,
}

impl OrderSummary {
    /// Starts a summary with shipping not yet known.
    pub fn for_product(product: &MarketProduct, quantity: u32) -> CoreResult<Self> {
        validate_quantity(quantity)?;
        validate_price("price", product.price)?;
        Ok(OrderSummary {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            unit_price: product.price,
            quantity,
            subtotal: order_value(product.price, quantity)?,
            currency: product.currency.clone(),
            shipping: ShippingEstimate::unknown("destination not chosen"),
        })
    }

    pub fn with_shipping(mut self, shipping: ShippingEstimate) -> Self {
        self.shipping = shipping;
        self
    }

    /// Listener target for the shipping calculator.
    pub fn update_shipping(&mut self, shipping: &ShippingEstimate) {
        self.shipping = shipping.clone();
    }

    /// Subtotal plus shipping, or `None` while shipping is unknown.
    pub fn total(&self) -> Option<Money> {
        let shipping = self.shipping.amount()?;
        self.subtotal.try_add(shipping).ok()
    }

    pub fn is_final(&self) -> bool {
        self.shipping.is_known()
    }

    /// The chargeable total. Fails while shipping is unknown.
    pub fn ensure_final(&self) -> CoreResult<Money> {
        match &self.shipping {
            ShippingEstimate::Unknown { reason } => Err(CoreError::ShippingUnresolved {
                reason: reason.clone(),
            }),
            known => self
                .subtotal
                .try_add(known.amount().unwrap_or_default()),
        }
    }

    /// Text for the shipping line.
    pub fn shipping_label(&self) -> String {
        match &self.shipping {
            ShippingEstimate::Free => "Free".to_string(),
            ShippingEstimate::Amount { amount } => format!("{} {}", amount, self.currency),
            ShippingEstimate::Unknown { .. } => "Calculated at next step".to_string(),
        }
    }
}

/// Flattened totals for API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub subtotal_cents: i64,
    /// `None` when shipping is unknown; `Some(0)` only when it is free.
    pub shipping_cents: Option<i64>,
    pub total_cents: Option<i64>,
    pub is_final: bool,
    pub shipping_label: String,
}

impl From<&OrderSummary> for OrderTotals {
    fn from(summary: &OrderSummary) -> Self {
        OrderTotals {
            subtotal_cents: summary.subtotal.cents(),
            shipping_cents: summary.shipping.amount().map(|m| m.cents()),
            total_cents: summary.total().map(|m| m.cents()),
            is_final: summary.is_final(),
            shipping_label: summary.shipping_label(),
        }
    }
}
