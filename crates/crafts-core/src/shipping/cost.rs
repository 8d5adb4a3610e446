//! # Cost Calculator
//!
//! Turns a product, a route and a method into a shipping price.
//!
//! ## Calculated Shipping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  zone_for(seller, destination) ───────────► UnsupportedRoute if None    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  rate_for(zone, method) ──────────────────► MissingRate if None         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  order_value > threshold? ────────────────► 0                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  billable = max(actual g, dimensional g) ─► OutOfRange above MAX_WEIGHT │
//! │  unit     = base + per_kg × (billable − 1000 g)                         │
//! │  total    = unit + (qty − 1) × unit × additional_unit_bps               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every step is checked integer cents: the result is never negative, and a
//! step that leaves the `i64` range is `AmountOverflow`, never a free parcel.

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::shipping::rates::{rate_for, RateEntry, ShippingRules, INCLUDED_GRAMS};
use crate::shipping::zones::zone_for;
use crate::types::{CostEstimate, CountryCode, ProductShippingDetails, ShippingMethod, ShippingType};
use crate::validation::{validate_amount, validate_quantity, validate_shipping_details};
use crate::MAX_WEIGHT_KG;

/// Everything the calculator needs for one quote.
#[derive(Debug, Clone, Copy)]
pub struct ShippingRequest<'a> {
    pub product: &'a ProductShippingDetails,
    pub destination: &'a CountryCode,
    pub seller: &'a CountryCode,
    pub method: ShippingMethod,
    /// Goods value of the order, used for the free-shipping threshold.
    pub order_value: Money,
    pub quantity: u32,
}

/// Computes the shipping cost for a request.
///
/// ## Errors
/// - [`CoreError::Validation`] for malformed product data or quantity
/// - [`CoreError::UnsupportedRoute`] when the country pair is not served
/// - [`CoreError::MissingRate`] when the rate table has no zone/method entry
/// - [`CoreError::ManualQuote`] for seller-quoted products
/// - [`CoreError::AmountOverflow`] when the price does not fit in cents
///
/// ## Example
/// ```rust
/// use crafts_core::money::Money;
/// use crafts_core::shipping::{calculate_shipping_cost, ShippingRequest, ShippingRules};
/// use crafts_core::types::{CountryCode, ProductShippingDetails, ShippingMethod};
///
/// let product = ProductShippingDetails::calculated(2.0);
/// let us = CountryCode::parse("US").unwrap();
/// let request = ShippingRequest {
///     product: &product,
///     destination: &us,
///     seller: &us,
///     method: ShippingMethod::Overnight,
///     order_value: Money::from_cents(8000),
///     quantity: 1,
/// };
///
/// let cost = calculate_shipping_cost(&request, &ShippingRules::default()).unwrap();
/// assert_eq!(cost.cents(), 3499); // 29.99 base + 5.00 for the second kilogram
/// ```
pub fn calculate_shipping_cost(
    request: &ShippingRequest<'_>,
    rules: &ShippingRules,
) -> CoreResult<Money> {
    validate_quantity(request.quantity)?;
    validate_amount("order_value", request.order_value)?;
    validate_shipping_details(request.product)?;

    match request.product.shipping_type {
        ShippingType::Free => Ok(Money::zero()),

        ShippingType::Flat => {
            let rate = request.product.flat_rate.ok_or_else(|| ValidationError::Required {
                field: "flat_rate".to_string(),
            })?;
            Ok(rate.non_negative())
        }

        ShippingType::Manual => Err(CoreError::ManualQuote),

        ShippingType::Calculated => calculated_cost(request, rules),
    }
}

/// Same as [`calculate_shipping_cost`], paired with the product's currency.
pub fn estimate_shipping_cost(
    request: &ShippingRequest<'_>,
    rules: &ShippingRules,
    currency: &str,
) -> CoreResult<CostEstimate> {
    let amount = calculate_shipping_cost(request, rules)?;
    Ok(CostEstimate {
        amount,
        currency: currency.to_string(),
    })
}

fn calculated_cost(request: &ShippingRequest<'_>, rules: &ShippingRules) -> CoreResult<Money> {
    let zone = zone_for(request.seller, request.destination).ok_or_else(|| {
        CoreError::UnsupportedRoute {
            origin: request.seller.clone(),
            destination: request.destination.clone(),
        }
    })?;

    let entry = rate_for(zone, request.method).ok_or(CoreError::MissingRate {
        zone,
        method: request.method,
    })?;

    let threshold = request
        .product
        .free_shipping_threshold
        .or(rules.free_shipping_threshold);
    if let Some(threshold) = threshold {
        if request.order_value > threshold {
            return Ok(Money::zero());
        }
    }

    let billable = billable_grams(request.product, rules);
    if billable > MAX_WEIGHT_KG * 1000 {
        return Err(ValidationError::OutOfRange {
            field: "billable_weight".to_string(),
            min: 0,
            max: MAX_WEIGHT_KG as i64,
        }
        .into());
    }

    let unit = unit_cost(entry, billable)?;
    let additional_units = i64::from(request.quantity.saturating_sub(1));
    let extra = unit
        .apply_bps(rules.additional_unit_bps)?
        .multiply_quantity(additional_units)?;

    Ok(unit.try_add(extra)?.non_negative())
}

/// Billable weight of one unit: the larger of actual and dimensional weight.
pub fn billable_grams(product: &ProductShippingDetails, rules: &ShippingRules) -> u64 {
    let dimensional = product
        .dimensions
        .map(|d| d.dimensional_weight_grams(rules.dimensional_divisor))
        .unwrap_or(0);
    product.weight_grams().max(dimensional)
}

/// Price of one unit from a rate entry and billable weight.
pub fn unit_cost(entry: &RateEntry, billable_grams: u64) -> CoreResult<Money> {
    let surcharge_grams = billable_grams.saturating_sub(INCLUDED_GRAMS);
    entry.base.try_add(entry.per_kg.per_thousandth(surcharge_grams)?)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shipping::rates::RATE_TABLE;
    use crate::types::{DimensionUnit, Dimensions, ShippingZone};

    fn cc(code: &str) -> CountryCode {
        CountryCode::parse(code).unwrap()
    }

    fn request<'a>(
        product: &'a ProductShippingDetails,
        destination: &'a CountryCode,
        seller: &'a CountryCode,
        method: ShippingMethod,
    ) -> ShippingRequest<'a> {
        ShippingRequest {
            product,
            destination,
            seller,
            method,
            order_value: Money::from_cents(5000),
            quantity: 1,
        }
    }

    #[test]
    fn test_free_is_always_zero() {
        let product = ProductShippingDetails::calculated(3.0).with_type(ShippingType::Free);
        let rules = ShippingRules::default();
        for dest in ["US", "CA", "DE", "JP"] {
            let dest = cc(dest);
            let seller = cc("US");
            for method in ShippingMethod::ALL {
                let mut req = request(&product, &dest, &seller, method);
                req.quantity = 7;
                assert_eq!(calculate_shipping_cost(&req, &rules).unwrap(), Money::zero());
            }
        }
    }

    #[test]
    fn test_flat_returns_flat_rate_exactly() {
        let product = ProductShippingDetails::flat(Money::from_cents(1250));
        let rules = ShippingRules::default();
        let seller = cc("US");
        for dest in ["US", "DE", "BR"] {
            let dest = cc(dest);
            for method in [ShippingMethod::Standard, ShippingMethod::Overnight] {
                let req = request(&product, &dest, &seller, method);
                assert_eq!(calculate_shipping_cost(&req, &rules).unwrap().cents(), 1250);
            }
        }
    }

    #[test]
    fn test_domestic_overnight_two_kilograms() {
        let product = ProductShippingDetails::calculated(2.0);
        let us = cc("US");
        let req = request(&product, &us, &us, ShippingMethod::Overnight);
        let cost = calculate_shipping_cost(&req, &ShippingRules::default()).unwrap();

        let tier = rate_for(ShippingZone::Domestic, ShippingMethod::Overnight).unwrap();
        assert!(cost >= tier.base);
        assert_eq!(cost.cents(), 3499);
    }

    #[test]
    fn test_order_value_above_threshold_ships_free() {
        let product = ProductShippingDetails::calculated(2.0);
        let us = cc("US");
        let rules = ShippingRules::default().with_free_shipping_threshold(Money::from_cents(10000));

        let mut req = request(&product, &us, &us, ShippingMethod::Standard);
        req.order_value = Money::from_cents(10001);
        assert_eq!(calculate_shipping_cost(&req, &rules).unwrap(), Money::zero());

        // Equal to the threshold does not exceed it
        req.order_value = Money::from_cents(10000);
        assert!(calculate_shipping_cost(&req, &rules).unwrap().is_positive());
    }

    #[test]
    fn test_product_threshold_overrides_rules() {
        let mut product = ProductShippingDetails::calculated(1.0);
        product.free_shipping_threshold = Some(Money::from_cents(2000));
        let us = cc("US");
        let rules = ShippingRules::default().with_free_shipping_threshold(Money::from_cents(90000));

        let mut req = request(&product, &us, &us, ShippingMethod::Standard);
        req.order_value = Money::from_cents(2500);
        assert_eq!(calculate_shipping_cost(&req, &rules).unwrap(), Money::zero());
    }

    #[test]
    fn test_additional_units_are_discounted() {
        let product = ProductShippingDetails::calculated(1.0);
        let us = cc("US");
        let mut req = request(&product, &us, &us, ShippingMethod::Standard);
        req.quantity = 3;
        let cost = calculate_shipping_cost(&req, &ShippingRules::default()).unwrap();
        // 599 + 2 × 300 (599 × 50% = 299.5 → 300)
        assert_eq!(cost.cents(), 1199);

        let full_price = ShippingRules::default().with_additional_unit_bps(10_000);
        assert_eq!(
            calculate_shipping_cost(&req, &full_price).unwrap().cents(),
            599 * 3
        );
    }

    #[test]
    fn test_dimensional_weight_wins_for_bulky_parcels() {
        let mut product = ProductShippingDetails::calculated(1.0);
        product.dimensions = Some(Dimensions {
            length: 50.0,
            width: 40.0,
            height: 30.0,
            unit: DimensionUnit::Cm,
        });
        let us = cc("US");
        let req = request(&product, &us, &us, ShippingMethod::Standard);
        // 12 kg billable → 599 + 11 × 150
        assert_eq!(
            calculate_shipping_cost(&req, &ShippingRules::default()).unwrap().cents(),
            599 + 11 * 150
        );
    }

    #[test]
    fn test_oversized_parcel_is_rejected_not_free() {
        let mut product = ProductShippingDetails::calculated(1.0);
        product.dimensions = Some(Dimensions {
            length: 1_000_000.0,
            width: 1_000_000.0,
            height: 1_000_000.0,
            unit: DimensionUnit::Cm,
        });
        let us = cc("US");
        let mut req = request(&product, &us, &us, ShippingMethod::Standard);
        req.quantity = 999;
        let result = calculate_shipping_cost(&req, &ShippingRules::default());
        assert!(matches!(result, Err(CoreError::Validation(_))));

        // Within the side limit but over the weight cap once volumetric
        product.dimensions = Some(Dimensions {
            length: 1_000.0,
            width: 1_000.0,
            height: 100.0,
            unit: DimensionUnit::Cm,
        });
        let mut req = request(&product, &us, &us, ShippingMethod::Standard);
        req.quantity = 999;
        assert!(matches!(
            calculate_shipping_cost(&req, &ShippingRules::default()),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_heaviest_parcel_at_max_quantity_is_priced() {
        let product = ProductShippingDetails::calculated(MAX_WEIGHT_KG as f64);
        let (us, de) = (cc("US"), cc("DE"));
        let mut req = request(&product, &de, &us, ShippingMethod::Standard);
        req.quantity = 999;
        let rules = ShippingRules::default().with_additional_unit_bps(u32::MAX);

        let cost = calculate_shipping_cost(&req, &rules).unwrap();
        assert!(cost.is_positive());
    }

    #[test]
    fn test_missing_rate_is_an_error() {
        let product = ProductShippingDetails::calculated(1.0);
        let (de, us) = (cc("DE"), cc("US"));
        let req = request(&product, &de, &us, ShippingMethod::Overnight);
        let err = calculate_shipping_cost(&req, &ShippingRules::default()).unwrap_err();
        assert!(matches!(
            err,
            CoreError::MissingRate {
                zone: ShippingZone::International,
                method: ShippingMethod::Overnight
            }
        ));
    }

    #[test]
    fn test_unsupported_route_and_manual() {
        let product = ProductShippingDetails::calculated(1.0);
        let (aq, us) = (cc("AQ"), cc("US"));
        let req = request(&product, &aq, &us, ShippingMethod::Standard);
        assert!(matches!(
            calculate_shipping_cost(&req, &ShippingRules::default()),
            Err(CoreError::UnsupportedRoute { .. })
        ));

        let manual = product.with_type(ShippingType::Manual);
        let req = request(&manual, &us, &us, ShippingMethod::Manual);
        assert!(matches!(
            calculate_shipping_cost(&req, &ShippingRules::default()),
            Err(CoreError::ManualQuote)
        ));
    }

    #[test]
    fn test_every_table_pair_is_non_negative() {
        let product = ProductShippingDetails::calculated(4.5);
        let rules = ShippingRules::default();
        // One representative route per zone
        let routes = [("US", "US"), ("US", "CA"), ("US", "DE")];
        for entry in RATE_TABLE {
            let (seller, dest) = routes
                .iter()
                .map(|(s, d)| (cc(s), cc(d)))
                .find(|(s, d)| zone_for(s, d) == Some(entry.zone))
                .unwrap();
            let req = request(&product, &dest, &seller, entry.method);
            assert!(!calculate_shipping_cost(&req, &rules).unwrap().is_negative());
        }
    }

    #[test]
    fn test_identical_inputs_identical_outputs() {
        let product = ProductShippingDetails::calculated(2.3);
        let (ca, us) = (cc("CA"), cc("US"));
        let mut req = request(&product, &ca, &us, ShippingMethod::Express);
        req.quantity = 4;
        let rules = ShippingRules::default();
        let first = calculate_shipping_cost(&req, &rules).unwrap();
        let second = calculate_shipping_cost(&req, &rules).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_quantity_rejected() {
        let product = ProductShippingDetails::calculated(1.0);
        let us = cc("US");
        let mut req = request(&product, &us, &us, ShippingMethod::Standard);
        req.quantity = 0;
        assert!(matches!(
            calculate_shipping_cost(&req, &ShippingRules::default()),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_estimate_carries_currency() {
        let product = ProductShippingDetails::flat(Money::from_cents(700));
        let us = cc("US");
        let req = request(&product, &us, &us, ShippingMethod::Standard);
        let estimate = estimate_shipping_cost(&req, &ShippingRules::default(), "USD").unwrap();
        assert_eq!(estimate.to_string(), "7.00 USD");
    }
}
