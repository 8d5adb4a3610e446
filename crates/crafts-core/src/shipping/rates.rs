//! # Rate & Transit Tables
//!
//! Static per-(zone, method) pricing and transit data, plus the tunable
//! [`ShippingRules`] that the configuration layer can override.
//!
//! ## Rate Table (cents)
//! ```text
//! ┌───────────────┬──────────────────┬──────────────────┬──────────────────┐
//! │ zone          │ standard         │ express          │ overnight        │
//! ├───────────────┼──────────────────┼──────────────────┼──────────────────┤
//! │ domestic      │  599 + 150/kg    │ 1499 + 300/kg    │ 2999 + 500/kg    │
//! │ regional      │ 1299 + 250/kg    │ 2999 + 450/kg    │        —         │
//! │ international │ 2499 + 400/kg    │        —         │        —         │
//! └───────────────┴──────────────────┴──────────────────┴──────────────────┘
//!   base covers the first kilogram; per/kg applies to every gram above it
//! ```
//!
//! ## Transit Table (days)
//! ```text
//! ┌───────────────┬──────────┬─────────┬───────────┐
//! │ zone          │ standard │ express │ overnight │
//! ├───────────────┼──────────┼─────────┼───────────┤
//! │ domestic      │   3-7    │   1-3   │    1-1    │
//! │ regional      │   5-10   │   2-5   │     —     │
//! │ international │   7-21   │    —    │     —     │
//! └───────────────┴──────────┴─────────┴───────────┘
//!   anything else → fallback window (default 7-30)
//! ```

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{DeliveryEstimate, ShippingMethod, ShippingZone};

// =============================================================================
// Rate Table
// =============================================================================

/// Price of one parcel for a zone/method pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateEntry {
    pub zone: ShippingZone,
    pub method: ShippingMethod,
    /// Covers the first [`INCLUDED_GRAMS`] of billable weight.
    pub base: Money,
    /// Charged per kilogram above the included weight, pro rata per gram.
    pub per_kg: Money,
}

/// Billable weight included in every base rate.
pub const INCLUDED_GRAMS: u64 = 1_000;

pub const RATE_TABLE: &[RateEntry] = &[
    RateEntry {
        zone: ShippingZone::Domestic,
        method: ShippingMethod::Standard,
        base: Money::from_cents(599),
        per_kg: Money::from_cents(150),
    },
    RateEntry {
        zone: ShippingZone::Domestic,
        method: ShippingMethod::Express,
        base: Money::from_cents(1499),
        per_kg: Money::from_cents(300),
    },
    RateEntry {
        zone: ShippingZone::Domestic,
        method: ShippingMethod::Overnight,
        base: Money::from_cents(2999),
        per_kg: Money::from_cents(500),
    },
    RateEntry {
        zone: ShippingZone::Regional,
        method: ShippingMethod::Standard,
        base: Money::from_cents(1299),
        per_kg: Money::from_cents(250),
    },
    RateEntry {
        zone: ShippingZone::Regional,
        method: ShippingMethod::Express,
        base: Money::from_cents(2999),
        per_kg: Money::from_cents(450),
    },
    RateEntry {
        zone: ShippingZone::International,
        method: ShippingMethod::Standard,
        base: Money::from_cents(2499),
        per_kg: Money::from_cents(400),
    },
];

/// Looks up the rate for a zone/method pair.
pub fn rate_for(zone: ShippingZone, method: ShippingMethod) -> Option<&'static RateEntry> {
    RATE_TABLE
        .iter()
        .find(|entry| entry.zone == zone && entry.method == method)
}

// =============================================================================
// Transit Table
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitEntry {
    pub zone: ShippingZone,
    pub method: ShippingMethod,
    pub window: DeliveryEstimate,
}

pub const TRANSIT_TABLE: &[TransitEntry] = &[
    TransitEntry {
        zone: ShippingZone::Domestic,
        method: ShippingMethod::Standard,
        window: DeliveryEstimate::new(3, 7),
    },
    TransitEntry {
        zone: ShippingZone::Domestic,
        method: ShippingMethod::Express,
        window: DeliveryEstimate::new(1, 3),
    },
    TransitEntry {
        zone: ShippingZone::Domestic,
        method: ShippingMethod::Overnight,
        window: DeliveryEstimate::new(1, 1),
    },
    TransitEntry {
        zone: ShippingZone::Regional,
        method: ShippingMethod::Standard,
        window: DeliveryEstimate::new(5, 10),
    },
    TransitEntry {
        zone: ShippingZone::Regional,
        method: ShippingMethod::Express,
        window: DeliveryEstimate::new(2, 5),
    },
    TransitEntry {
        zone: ShippingZone::International,
        method: ShippingMethod::Standard,
        window: DeliveryEstimate::new(7, 21),
    },
];

pub fn transit_for(zone: ShippingZone, method: ShippingMethod) -> Option<DeliveryEstimate> {
    TRANSIT_TABLE
        .iter()
        .find(|entry| entry.zone == zone && entry.method == method)
        .map(|entry| entry.window)
}

// =============================================================================
// Shipping Rules
// =============================================================================

/// Default share of the unit cost charged for each additional unit (50%).
pub const DEFAULT_ADDITIONAL_UNIT_BPS: u32 = 5_000;

/// An additional unit never costs more than the first one.
pub const MAX_ADDITIONAL_UNIT_BPS: u32 = 10_000;

/// Carrier volumetric divisor: cm³ per billable kilogram.
pub const DEFAULT_DIMENSIONAL_DIVISOR: u32 = 5_000;

/// Window used when no transit entry applies.
pub const FALLBACK_DELIVERY: DeliveryEstimate = DeliveryEstimate::new(7, 30);

/// Tunables applied on top of the static tables.
///
/// Deserializable so the `[shipping]` section of the marketplace config can
/// override any field; missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShippingRules {
    /// Orders strictly above this value ship free. `None` disables it.
    pub free_shipping_threshold: Option<Money>,

    /// Basis points of the unit cost charged for every unit after the first.
    pub additional_unit_bps: u32,

    /// cm³ per kg for dimensional weight.
    pub dimensional_divisor: u32,

    /// Transit window for routes/methods missing from the table.
    pub fallback_delivery: DeliveryEstimate,
}

impl Default for ShippingRules {
    fn default() -> Self {
        ShippingRules {
            free_shipping_threshold: None,
            additional_unit_bps: DEFAULT_ADDITIONAL_UNIT_BPS,
            dimensional_divisor: DEFAULT_DIMENSIONAL_DIVISOR,
            fallback_delivery: FALLBACK_DELIVERY,
        }
    }
}

impl ShippingRules {
    /// Sets the marketplace-wide free-shipping threshold.
    pub fn with_free_shipping_threshold(mut self, threshold: Money) -> Self {
        self.free_shipping_threshold = Some(threshold);
        self
    }

    pub fn with_additional_unit_bps(mut self, bps: u32) -> Self {
        self.additional_unit_bps = bps;
        self
    }
}
