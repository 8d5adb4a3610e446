//! # Shipping Method Resolver
//!
//! Decides which methods a builder may pick for a product and destination.
//!
//! ```text
//! shipping_type = manual      → [manual]                       (any route)
//! route not served            → []                             ("unavailable")
//! shipping_type = free        → [standard, express, overnight]
//! otherwise, by zone:
//!     domestic                → [standard, express, overnight]
//!     regional                → [standard, express]
//!     international           → [standard]
//! ```

use crate::shipping::zones::zone_for;
use crate::types::{CountryCode, ProductShippingDetails, ShippingMethod, ShippingType, ShippingZone};

const CARRIER_METHODS: [ShippingMethod; 3] = [
    ShippingMethod::Standard,
    ShippingMethod::Express,
    ShippingMethod::Overnight,
];

/// Lists the shipping methods available for a shipment.
///
/// An empty vector means "shipping unavailable"; it is not an error.
///
/// ## Example
/// ```rust
/// use crafts_core::shipping::available_shipping_methods;
/// use crafts_core::types::{CountryCode, ProductShippingDetails, ShippingMethod, ShippingType};
///
/// let product = ProductShippingDetails::calculated(1.0).with_type(ShippingType::Manual);
/// let de = CountryCode::parse("DE").unwrap();
/// let us = CountryCode::parse("US").unwrap();
///
/// assert_eq!(
///     available_shipping_methods(&de, &us, &product),
///     vec![ShippingMethod::Manual]
/// );
/// ```
pub fn available_shipping_methods(
    destination: &CountryCode,
    seller: &CountryCode,
    product: &ProductShippingDetails,
) -> Vec<ShippingMethod> {
    if product.shipping_type == ShippingType::Manual {
        return vec![ShippingMethod::Manual];
    }

    let Some(zone) = zone_for(seller, destination) else {
        return Vec::new();
    };

    if product.shipping_type == ShippingType::Free {
        return CARRIER_METHODS.to_vec();
    }

    methods_for_zone(zone)
}

/// Carrier methods offered in a zone.
pub fn methods_for_zone(zone: ShippingZone) -> Vec<ShippingMethod> {
    match zone {
        ShippingZone::Domestic => CARRIER_METHODS.to_vec(),
        ShippingZone::Regional => vec![ShippingMethod::Standard, ShippingMethod::Express],
        ShippingZone::International => vec![ShippingMethod::Standard],
    }
}
