//! # Shipping Zones
//!
//! Static country → region map, and the zone derived from a country pair.
//!
//! ```text
//! seller US, destination US  → Domestic       (same country)
//! seller US, destination CA  → Regional       (same region: North America)
//! seller US, destination DE  → International  (different regions)
//! seller US, destination AQ  → None           (not served)
//! ```

use serde::{Deserialize, Serialize};

use crate::types::{CountryCode, ShippingZone};

/// Geographic grouping used to decide "regional" versus "international".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    NorthAmerica,
    Europe,
    AsiaPacific,
    LatinAmerica,
    MiddleEastAfrica,
}

const REGIONS: &[(&str, Region)] = &[
    // North America
    ("US", Region::NorthAmerica),
    ("CA", Region::NorthAmerica),
    ("MX", Region::NorthAmerica),
    // Europe
    ("GB", Region::Europe),
    ("IE", Region::Europe),
    ("FR", Region::Europe),
    ("DE", Region::Europe),
    ("NL", Region::Europe),
    ("BE", Region::Europe),
    ("LU", Region::Europe),
    ("ES", Region::Europe),
    ("PT", Region::Europe),
    ("IT", Region::Europe),
    ("AT", Region::Europe),
    ("CH", Region::Europe),
    ("DK", Region::Europe),
    ("SE", Region::Europe),
    ("NO", Region::Europe),
    ("FI", Region::Europe),
    ("PL", Region::Europe),
    ("CZ", Region::Europe),
    // Asia Pacific
    ("JP", Region::AsiaPacific),
    ("KR", Region::AsiaPacific),
    ("CN", Region::AsiaPacific),
    ("SG", Region::AsiaPacific),
    ("IN", Region::AsiaPacific),
    ("AU", Region::AsiaPacific),
    ("NZ", Region::AsiaPacific),
    // Latin America
    ("BR", Region::LatinAmerica),
    ("AR", Region::LatinAmerica),
    ("CL", Region::LatinAmerica),
    ("CO", Region::LatinAmerica),
    ("PE", Region::LatinAmerica),
    // Middle East & Africa
    ("AE", Region::MiddleEastAfrica),
    ("SA", Region::MiddleEastAfrica),
    ("IL", Region::MiddleEastAfrica),
    ("ZA", Region::MiddleEastAfrica),
    ("NG", Region::MiddleEastAfrica),
    ("KE", Region::MiddleEastAfrica),
    ("EG", Region::MiddleEastAfrica),
];

/// Region of a served country, `None` when we do not ship there.
pub fn region_of(country: &CountryCode) -> Option<Region> {
    REGIONS
        .iter()
        .find(|(code, _)| *code == country.as_str())
        .map(|(_, region)| *region)
}

/// Derives the pricing zone for a shipment.
///
/// Returns `None` when either side is not served; callers surface that as
/// "shipping unavailable" rather than an error.
pub fn zone_for(seller: &CountryCode, destination: &CountryCode) -> Option<ShippingZone> {
    let origin_region = region_of(seller)?;
    let destination_region = region_of(destination)?;

    if seller == destination {
        Some(ShippingZone::Domestic)
    } else if origin_region == destination_region {
        Some(ShippingZone::Regional)
    } else {
        Some(ShippingZone::International)
    }
}

/// Every served country code, in table order.
pub fn served_countries() -> impl Iterator<Item = &'static str> {
    REGIONS.iter().map(|(code, _)| *code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cc(code: &str) -> CountryCode {
        CountryCode::parse(code).unwrap()
    }

    #[test]
    fn test_zone_for_pairs() {
        assert_eq!(zone_for(&cc("US"), &cc("US")), Some(ShippingZone::Domestic));
        assert_eq!(zone_for(&cc("US"), &cc("CA")), Some(ShippingZone::Regional));
        assert_eq!(zone_for(&cc("FR"), &cc("DE")), Some(ShippingZone::Regional));
        assert_eq!(zone_for(&cc("US"), &cc("DE")), Some(ShippingZone::International));
        assert_eq!(zone_for(&cc("JP"), &cc("BR")), Some(ShippingZone::International));
    }

    #[test]
    fn test_unserved_countries_have_no_zone() {
        assert_eq!(zone_for(&cc("US"), &cc("AQ")), None);
        assert_eq!(zone_for(&cc("AQ"), &cc("US")), None);
        // Same unserved country is still unserved, not domestic
        assert_eq!(zone_for(&cc("AQ"), &cc("AQ")), None);
    }

    #[test]
    fn test_region_table_has_no_duplicates() {
        let mut codes: Vec<&str> = served_countries().collect();
        let total = codes.len();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), total);
        assert!(codes.iter().all(|c| CountryCode::parse(c).is_ok()));
    }
}
