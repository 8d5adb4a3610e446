//! # crafts-core: Shipping Rules for the CraftsMatch Marketplace
//!
//! Pure shipping logic for a marketplace of craftsmen and buyers: which
//! methods reach a destination, what they cost, how long they take, and how
//! the result reaches checkout. Nothing here touches a database or network.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     CraftsMatch Shipping Stack                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Checkout form (country, method, quantity)          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ crafts-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   calculator ──► shipping::{resolver, cost, delivery}           │   │
//! │  │       │                     │                                   │   │
//! │  │       ▼                     ▼                                   │   │
//! │  │   checkout          zones + rates tables                        │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            crafts-db (stores, config, quote service)            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Countries, methods, shipping metadata, estimates, roles
//! - [`money`] - Integer-cent money
//! - [`shipping`] - Zones, rate tables, resolver, cost and delivery
//! - [`calculator`] - Reactive form state driving the shipping functions
//! - [`checkout`] - Order totals with a tri-state shipping line
//! - [`validation`] - Input checks for product data and requests
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use crafts_core::money::Money;
//! use crafts_core::shipping::{calculate_shipping_cost, ShippingRequest, ShippingRules};
//! use crafts_core::types::{CountryCode, ProductShippingDetails, ShippingMethod};
//!
//! let product = ProductShippingDetails::calculated(1.0);
//! let us = CountryCode::parse("US").unwrap();
//!
//! let request = ShippingRequest {
//!     product: &product,
//!     destination: &us,
//!     seller: &us,
//!     method: ShippingMethod::Standard,
//!     order_value: Money::from_cents(2500),
//!     quantity: 1,
//! };
//!
//! let cost = calculate_shipping_cost(&request, &ShippingRules::default()).unwrap();
//! assert_eq!(cost.to_string(), "5.99");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculator;
pub mod checkout;
pub mod error;
pub mod money;
pub mod shipping;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use calculator::{EstimateState, ShippingCalculator};
pub use checkout::{OrderSummary, OrderTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use shipping::ShippingRules;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Currency used when a listing or config does not name one.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Maximum units of one product in a single order.
///
/// Catches typos like 1000 instead of 10 before they reach a quote.
pub const MAX_ORDER_QUANTITY: u32 = 999;

/// Heaviest single unit a listing may declare, in kilograms.
pub const MAX_WEIGHT_KG: u64 = 1000;

/// Longest workshop lead time a listing may declare, in days.
pub const MAX_LEAD_TIME_DAYS: u32 = 365;

/// Longest parcel side a listing may declare, in centimetres.
pub const MAX_DIMENSION_CM: f64 = 1_000.0;

/// Highest unit price, flat rate or threshold a listing may carry, in cents.
pub const MAX_PRICE_CENTS: i64 = 10_000_000_000;
