//! # Shipping Module
//!
//! Rules evaluation for shipping price and transit time.
//!
//! ## Components (leaf first)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  zones     country → region, (seller, destination) → ShippingZone      │
//! │  rates     zone × method → RateEntry / transit window, ShippingRules   │
//! │     │                                                                   │
//! │     ├──► resolver   available_shipping_methods()                       │
//! │     ├──► cost       calculate_shipping_cost()                          │
//! │     └──► delivery   estimate_delivery_time()                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All functions are pure: identical inputs give identical outputs.

pub mod cost;
pub mod delivery;
pub mod rates;
pub mod resolver;
pub mod zones;

pub use cost::{calculate_shipping_cost, estimate_shipping_cost, ShippingRequest};
pub use delivery::{estimate_delivery_time, estimate_delivery_with_lead_time};
pub use rates::ShippingRules;
pub use resolver::available_shipping_methods;
pub use zones::zone_for;
