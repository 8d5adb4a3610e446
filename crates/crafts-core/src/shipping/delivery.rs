//! # Delivery Estimator
//!
//! Pure lookup of transit windows. There is no error path: anything the
//! transit table does not cover gets the rules' fallback window.

use crate::shipping::rates::{transit_for, ShippingRules};
use crate::shipping::zones::zone_for;
use crate::types::{CountryCode, DeliveryEstimate, ShippingMethod};

/// Estimates transit time for a route and method.
///
/// ## Example
/// ```rust
/// use crafts_core::shipping::{estimate_delivery_time, ShippingRules};
/// use crafts_core::types::{CountryCode, ShippingMethod};
///
/// let us = CountryCode::parse("US").unwrap();
/// let estimate = estimate_delivery_time(&us, &us, ShippingMethod::Overnight, &ShippingRules::default());
/// assert_eq!((estimate.min_days, estimate.max_days), (1, 1));
/// ```
pub fn estimate_delivery_time(
    destination: &CountryCode,
    seller: &CountryCode,
    method: ShippingMethod,
    rules: &ShippingRules,
) -> DeliveryEstimate {
    zone_for(seller, destination)
        .and_then(|zone| transit_for(zone, method))
        .unwrap_or(rules.fallback_delivery)
}

/// Transit estimate plus the product's workshop lead time.
pub fn estimate_delivery_with_lead_time(
    destination: &CountryCode,
    seller: &CountryCode,
    method: ShippingMethod,
    lead_time_days: u32,
    rules: &ShippingRules,
) -> DeliveryEstimate {
    estimate_delivery_time(destination, seller, method, rules).with_lead_time(lead_time_days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shipping::rates::FALLBACK_DELIVERY;
    use crate::shipping::zones::served_countries;

    fn cc(code: &str) -> CountryCode {
        CountryCode::parse(code).unwrap()
    }

    #[test]
    fn test_table_windows() {
        let rules = ShippingRules::default();
        let us = cc("US");
        assert_eq!(
            estimate_delivery_time(&us, &us, ShippingMethod::Standard, &rules),
            DeliveryEstimate::new(3, 7)
        );
        assert_eq!(
            estimate_delivery_time(&us, &us, ShippingMethod::Express, &rules),
            DeliveryEstimate::new(1, 3)
        );
        assert_eq!(
            estimate_delivery_time(&cc("DE"), &us, ShippingMethod::Standard, &rules),
            DeliveryEstimate::new(7, 21)
        );
    }

    #[test]
    fn test_unknown_combinations_fall_back() {
        let rules = ShippingRules::default();
        let us = cc("US");
        assert_eq!(
            estimate_delivery_time(&cc("AQ"), &us, ShippingMethod::Standard, &rules),
            FALLBACK_DELIVERY
        );
        assert_eq!(
            estimate_delivery_time(&us, &us, ShippingMethod::Manual, &rules),
            FALLBACK_DELIVERY
        );
        assert_eq!(
            estimate_delivery_time(&cc("JP"), &us, ShippingMethod::Overnight, &rules),
            FALLBACK_DELIVERY
        );
    }

    #[test]
    fn test_min_never_exceeds_max() {
        let rules = ShippingRules::default();
        let seller = cc("US");
        for dest in served_countries().chain(["AQ", "ZZ"]) {
            let dest = cc(dest);
            for method in ShippingMethod::ALL {
                let e = estimate_delivery_time(&dest, &seller, method, &rules);
                assert!(e.min_days <= e.max_days, "{dest} {method}: {e:?}");
            }
        }
    }

    #[test]
    fn test_lead_time_shifts_both_bounds() {
        let rules = ShippingRules::default();
        let us = cc("US");
        let e = estimate_delivery_with_lead_time(&us, &us, ShippingMethod::Overnight, 5, &rules);
        assert_eq!(e, DeliveryEstimate::new(6, 6));
    }
}
