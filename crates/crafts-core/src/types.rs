//! # Domain Types
//!
//! Core domain types used throughout CraftsMatch shipping.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────────┐   ┌─────────────────┐  │
//! │  │  MarketUser     │   │  MarketProduct       │   │  CountryCode    │  │
//! │  │  ─────────────  │   │  ──────────────────  │   │  ─────────────  │  │
//! │  │  id (UUID)      │◄──│  seller_id           │   │  "US", "DE"     │  │
//! │  │  role           │   │  price (Money)       │   └─────────────────┘  │
//! │  │  country        │   │  shipping ───────────┼──► ProductShipping-   │
//! │  └─────────────────┘   └──────────────────────┘    Details            │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌──────────────────────┐  │
//! │  │  ShippingZone   │   │ ShippingMethod  │   │ ShippingType         │  │
//! │  │  Domestic       │   │ Standard        │   │ Flat / Calculated    │  │
//! │  │  Regional       │   │ Express         │   │ Free / Manual        │  │
//! │  │  International  │   │ Overnight/Manual│   └──────────────────────┘  │
//! │  └─────────────────┘   └─────────────────┘                              │
//! │                                                                         │
//! │  Outputs: CostEstimate, DeliveryEstimate, ShippingEstimate (tri-state) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Country Code
// =============================================================================

/// ISO 3166-1 alpha-2 country code, normalized to uppercase.
///
/// ## Example
/// ```rust
/// use crafts_core::types::CountryCode;
///
/// let us: CountryCode = " us ".parse().unwrap();
/// assert_eq!(us.as_str(), "US");
/// assert!("USA".parse::<CountryCode>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct CountryCode(String);

impl CountryCode {
    /// Parses and normalizes a two-letter code.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let code = raw.trim().to_ascii_uppercase();
        if code.is_empty() {
            return Err(ValidationError::Required {
                field: "country".to_string(),
            });
        }
        if code.len() != 2 || !code.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ValidationError::InvalidFormat {
                field: "country".to_string(),
                reason: format!("'{}' is not a two-letter ISO code", raw.trim()),
            });
        }
        Ok(CountryCode(code))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CountryCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CountryCode::parse(s)
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CountryCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        CountryCode::parse(&raw).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Shipping Zone
// =============================================================================

/// Pricing tier derived from a (seller, destination) country pair.
///
/// Never persisted; see [`crate::shipping::zones::zone_for`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ShippingZone {
    /// Seller and buyer in the same country.
    Domestic,
    /// Different countries within the same region (e.g. US → CA).
    Regional,
    /// Different regions.
    International,
}

impl ShippingZone {
    pub const ALL: [ShippingZone; 3] = [
        ShippingZone::Domestic,
        ShippingZone::Regional,
        ShippingZone::International,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            ShippingZone::Domestic => "domestic",
            ShippingZone::Regional => "regional",
            ShippingZone::International => "international",
        }
    }
}

impl fmt::Display for ShippingZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Shipping Method
// =============================================================================

/// How a parcel travels. Availability depends on zone and shipping type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ShippingMethod {
    Standard,
    Express,
    Overnight,
    /// Arranged directly between craftsman and builder.
    Manual,
}

impl ShippingMethod {
    pub const ALL: [ShippingMethod; 4] = [
        ShippingMethod::Standard,
        ShippingMethod::Express,
        ShippingMethod::Overnight,
        ShippingMethod::Manual,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            ShippingMethod::Standard => "standard",
            ShippingMethod::Express => "express",
            ShippingMethod::Overnight => "overnight",
            ShippingMethod::Manual => "manual",
        }
    }
}

impl fmt::Display for ShippingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShippingMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShippingMethod::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "shipping_method".to_string(),
                allowed: ShippingMethod::ALL.iter().map(|m| m.to_string()).collect(),
            })
    }
}

// =============================================================================
// Shipping Type
// =============================================================================

/// How the seller prices shipping for a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ShippingType {
    /// One fixed price regardless of destination or method.
    Flat,
    /// Priced from the zone × method rate table and parcel weight.
    Calculated,
    /// Shipping included in the product price.
    Free,
    /// Quoted by the seller after the order is placed.
    Manual,
}

impl ShippingType {
    pub const ALL: [ShippingType; 4] = [
        ShippingType::Flat,
        ShippingType::Calculated,
        ShippingType::Free,
        ShippingType::Manual,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            ShippingType::Flat => "flat",
            ShippingType::Calculated => "calculated",
            ShippingType::Free => "free",
            ShippingType::Manual => "manual",
        }
    }
}

impl Default for ShippingType {
    fn default() -> Self {
        ShippingType::Calculated
    }
}

impl fmt::Display for ShippingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShippingType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShippingType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "shipping_type".to_string(),
                allowed: ShippingType::ALL.iter().map(|t| t.to_string()).collect(),
            })
    }
}

// =============================================================================
// Weight & Dimensions
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum WeightUnit {
    Kg,
    G,
    Lb,
    Oz,
}

impl WeightUnit {
    /// Grams per one unit.
    pub const fn grams_per_unit(&self) -> f64 {
        match self {
            WeightUnit::Kg => 1000.0,
            WeightUnit::G => 1.0,
            WeightUnit::Lb => 453.592_37,
            WeightUnit::Oz => 28.349_523_125,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::G => "g",
            WeightUnit::Lb => "lb",
            WeightUnit::Oz => "oz",
        }
    }
}

impl Default for WeightUnit {
    fn default() -> Self {
        WeightUnit::Kg
    }
}

impl FromStr for WeightUnit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kg" => Ok(WeightUnit::Kg),
            "g" => Ok(WeightUnit::G),
            "lb" | "lbs" => Ok(WeightUnit::Lb),
            "oz" => Ok(WeightUnit::Oz),
            _ => Err(ValidationError::NotAllowed {
                field: "weight_unit".to_string(),
                allowed: vec!["kg".into(), "g".into(), "lb".into(), "oz".into()],
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DimensionUnit {
    Cm,
    In,
}

impl DimensionUnit {
    pub const fn cm_per_unit(&self) -> f64 {
        match self {
            DimensionUnit::Cm => 1.0,
            DimensionUnit::In => 2.54,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            DimensionUnit::Cm => "cm",
            DimensionUnit::In => "in",
        }
    }
}

impl FromStr for DimensionUnit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cm" => Ok(DimensionUnit::Cm),
            "in" | "inch" => Ok(DimensionUnit::In),
            _ => Err(ValidationError::NotAllowed {
                field: "dimension_unit".to_string(),
                allowed: vec!["cm".into(), "in".into()],
            }),
        }
    }
}

impl Default for DimensionUnit {
    fn default() -> Self {
        DimensionUnit::Cm
    }
}

/// Parcel dimensions, used for volumetric (dimensional) weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub unit: DimensionUnit,
}

impl Dimensions {
    /// Volume in cubic centimetres.
    pub fn volume_cm3(&self) -> f64 {
        let f = self.unit.cm_per_unit();
        (self.length * f) * (self.width * f) * (self.height * f)
    }

    /// Volumetric weight in grams for a carrier divisor (cm³ per kg).
    ///
    /// ## Example
    /// ```rust
    /// use crafts_core::types::{Dimensions, DimensionUnit};
    ///
    /// let box_ = Dimensions { length: 50.0, width: 40.0, height: 30.0, unit: DimensionUnit::Cm };
    /// // 60 000 cm³ / 5000 = 12 kg
    /// assert_eq!(box_.dimensional_weight_grams(5000), 12_000);
    /// ```
    pub fn dimensional_weight_grams(&self, divisor_cm3_per_kg: u32) -> u64 {
        if divisor_cm3_per_kg == 0 {
            return 0;
        }
        let grams = self.volume_cm3() * 1000.0 / divisor_cm3_per_kg as f64;
        grams.max(0.0).ceil() as u64
    }
}

// =============================================================================
// Product Shipping Details
// =============================================================================

/// Shipping metadata owned by a product. Read-only input to the calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductShippingDetails {
    /// Weight of one unit, in `weight_unit`.
    pub weight: f64,

    #[serde(default)]
    pub weight_unit: WeightUnit,

    pub dimensions: Option<Dimensions>,

    pub shipping_type: ShippingType,

    /// Required when `shipping_type` is `Flat`.
    pub flat_rate: Option<Money>,

    /// Handling days before the parcel leaves the workshop.
    #[serde(default)]
    pub lead_time_days: u32,

    /// Product-level free-shipping threshold; overrides the configured default.
    #[serde(default)]
    pub free_shipping_threshold: Option<Money>,
}

impl ProductShippingDetails {
    /// Actual weight of one unit in grams, rounded up.
    pub fn weight_grams(&self) -> u64 {
        (self.weight * self.weight_unit.grams_per_unit()).max(0.0).ceil() as u64
    }

    /// Convenience constructor for a calculated-shipping product.
    pub fn calculated(weight_kg: f64) -> Self {
        ProductShippingDetails {
            weight: weight_kg,
            weight_unit: WeightUnit::Kg,
            dimensions: None,
            shipping_type: ShippingType::Calculated,
            flat_rate: None,
            lead_time_days: 0,
            free_shipping_threshold: None,
        }
    }

    /// Convenience constructor for a flat-rate product.
    pub fn flat(rate: Money) -> Self {
        ProductShippingDetails {
            shipping_type: ShippingType::Flat,
            flat_rate: Some(rate),
            ..ProductShippingDetails::calculated(1.0)
        }
    }

    pub fn with_type(mut self, shipping_type: ShippingType) -> Self {
        self.shipping_type = shipping_type;
        self
    }
}

// =============================================================================
// Estimates
// =============================================================================

/// A computed shipping price with its currency. Ephemeral.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CostEstimate {
    pub amount: Money,
    pub currency: String,
}

impl fmt::Display for CostEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

/// Transit window in days. Always `min_days <= max_days`.
///
/// Deserializing an inverted window fails, so a window read from
/// configuration upholds the same invariant as [`DeliveryEstimate::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryEstimate {
    pub min_days: u32,
    pub max_days: u32,
}

impl DeliveryEstimate {
    /// Builds an estimate, ordering the bounds if they arrive swapped.
    pub const fn new(a: u32, b: u32) -> Self {
        if a <= b {
            DeliveryEstimate {
                min_days: a,
                max_days: b,
            }
        } else {
            DeliveryEstimate {
                min_days: b,
                max_days: a,
            }
        }
    }

    /// Adds workshop lead time to both bounds.
    pub const fn with_lead_time(self, days: u32) -> Self {
        DeliveryEstimate {
            min_days: self.min_days.saturating_add(days),
            max_days: self.max_days.saturating_add(days),
        }
    }
}

impl<'de> Deserialize<'de> for DeliveryEstimate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Window {
            min_days: u32,
            max_days: u32,
        }

        let window = Window::deserialize(deserializer)?;
        if window.min_days > window.max_days {
            return Err(serde::de::Error::custom(format!(
                "delivery window minDays ({}) exceeds maxDays ({})",
                window.min_days, window.max_days
            )));
        }
        Ok(DeliveryEstimate {
            min_days: window.min_days,
            max_days: window.max_days,
        })
    }
}

impl fmt::Display for DeliveryEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min_days == self.max_days {
            write!(f, "{} day(s)", self.min_days)
        } else {
            write!(f, "{}-{} days", self.min_days, self.max_days)
        }
    }
}

/// What the checkout form learns about shipping.
///
/// ## Why Three States?
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Free          → shipping costs nothing, total is final                 │
/// │  Amount{..}    → shipping costs this much, total is final               │
/// │  Unknown{..}   → no price yet (error, manual quote, no country chosen)  │
/// │                  total must be shown as "plus shipping", NOT as free    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShippingEstimate {
    Unknown { reason: String },
    Free,
    Amount { amount: Money },
}

impl ShippingEstimate {
    pub fn unknown(reason: impl Into<String>) -> Self {
        ShippingEstimate::Unknown {
            reason: reason.into(),
        }
    }

    /// Maps a computed cost onto the two known states.
    pub fn from_cost(amount: Money) -> Self {
        if amount.is_zero() {
            ShippingEstimate::Free
        } else {
            ShippingEstimate::Amount { amount }
        }
    }

    /// The known cost, `None` when unknown.
    pub fn amount(&self) -> Option<Money> {
        match self {
            ShippingEstimate::Unknown { .. } => None,
            ShippingEstimate::Free => Some(Money::zero()),
            ShippingEstimate::Amount { amount } => Some(*amount),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ShippingEstimate::Unknown { .. })
    }
}

// =============================================================================
// Roles
// =============================================================================

/// Marketplace role. Matched exhaustively; there is no string fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Seller producing handcrafted goods.
    Craftsman,
    /// Buyer purchasing craftsman goods.
    Builder,
    Admin,
}

impl Role {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Craftsman => "craftsman",
            Role::Builder => "builder",
            Role::Admin => "admin",
        }
    }

    /// May own a storefront and list products (and thus be a shipping origin).
    pub const fn can_sell(&self) -> bool {
        match self {
            Role::Craftsman | Role::Admin => true,
            Role::Builder => false,
        }
    }

    /// May request quotes and place orders.
    pub const fn can_buy(&self) -> bool {
        match self {
            Role::Builder | Role::Admin => true,
            Role::Craftsman => false,
        }
    }

    pub const fn can_moderate(&self) -> bool {
        match self {
            Role::Admin => true,
            Role::Craftsman | Role::Builder => false,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "craftsman" => Ok(Role::Craftsman),
            "builder" => Ok(Role::Builder),
            "admin" => Ok(Role::Admin),
            _ => Err(ValidationError::NotAllowed {
                field: "role".to_string(),
                allowed: vec!["craftsman".into(), "builder".into(), "admin".into()],
            }),
        }
    }
}

// =============================================================================
// Marketplace Entities
// =============================================================================

/// A marketplace account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MarketUser {
    /// Unique identifier (UUID v4).
    pub id: String,
    pub display_name: String,
    pub role: Role,
    /// Workshop country for craftsmen; the origin of every shipment.
    pub country: CountryCode,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// A product listed on a craftsman's storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MarketProduct {
    /// Unique identifier (UUID v4).
    pub id: String,
    /// The craftsman who sells (and ships) the product.
    pub seller_id: String,
    pub name: String,
    pub description: Option<String>,
    /// Unit price in `currency`.
    pub price: Money,
    /// ISO 4217 code.
    pub currency: String,
    pub shipping: ProductShippingDetails,
    /// Soft-delete flag.
    pub is_active: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_code_normalizes() {
        assert_eq!(CountryCode::parse("de").unwrap().as_str(), "DE");
        assert!(CountryCode::parse("").is_err());
        assert!(CountryCode::parse("D1").is_err());
        assert!(CountryCode::parse("DEU").is_err());
    }

    #[test]
    fn test_country_code_deserializes_with_validation() {
        let code: CountryCode = serde_json::from_str("\"gb\"").unwrap();
        assert_eq!(code.as_str(), "GB");
        assert!(serde_json::from_str::<CountryCode>("\"GBR\"").is_err());
    }

    #[test]
    fn test_method_round_trips_through_str() {
        for method in ShippingMethod::ALL {
            assert_eq!(method.as_str().parse::<ShippingMethod>().unwrap(), method);
        }
        assert!("teleport".parse::<ShippingMethod>().is_err());
    }

    #[test]
    fn test_weight_grams_conversion() {
        let mut details = ProductShippingDetails::calculated(2.0);
        assert_eq!(details.weight_grams(), 2000);

        details.weight = 1.0;
        details.weight_unit = WeightUnit::Lb;
        assert_eq!(details.weight_grams(), 454);

        details.weight = 250.0;
        details.weight_unit = WeightUnit::G;
        assert_eq!(details.weight_grams(), 250);
    }

    #[test]
    fn test_dimensional_weight_in_inches() {
        let dims = Dimensions {
            length: 10.0,
            width: 10.0,
            height: 10.0,
            unit: DimensionUnit::In,
        };
        // 1000 in³ = 16387.064 cm³ → 3.2774 kg
        assert_eq!(dims.dimensional_weight_grams(5000), 3278);
        assert_eq!(dims.dimensional_weight_grams(0), 0);
    }

    #[test]
    fn test_delivery_estimate_orders_bounds() {
        let estimate = DeliveryEstimate::new(9, 4);
        assert_eq!(estimate.min_days, 4);
        assert_eq!(estimate.max_days, 9);
        assert_eq!(estimate.with_lead_time(3), DeliveryEstimate::new(7, 12));
        assert_eq!(DeliveryEstimate::new(1, 1).to_string(), "1 day(s)");
    }

    #[test]
    fn test_shipping_estimate_states() {
        assert_eq!(ShippingEstimate::from_cost(Money::zero()), ShippingEstimate::Free);
        assert_eq!(
            ShippingEstimate::from_cost(Money::from_cents(599)).amount(),
            Some(Money::from_cents(599))
        );
        let unknown = ShippingEstimate::unknown("no country");
        assert!(!unknown.is_known());
        assert_eq!(unknown.amount(), None);
    }

    #[test]
    fn test_shipping_estimate_json_is_tagged() {
        let json = serde_json::to_string(&ShippingEstimate::Amount {
            amount: Money::from_cents(1250),
        })
        .unwrap();
        assert_eq!(json, r#"{"kind":"amount","amount":1250}"#);
        assert_eq!(
            serde_json::to_string(&ShippingEstimate::Free).unwrap(),
            r#"{"kind":"free"}"#
        );
    }

    #[test]
    fn test_role_capabilities_are_exhaustive() {
        assert!(Role::Craftsman.can_sell());
        assert!(!Role::Craftsman.can_buy());
        assert!(Role::Builder.can_buy());
        assert!(!Role::Builder.can_sell());
        assert!(Role::Admin.can_moderate());
        assert_eq!("Builder".parse::<Role>().unwrap(), Role::Builder);
        assert!("guest".parse::<Role>().is_err());
    }
}
