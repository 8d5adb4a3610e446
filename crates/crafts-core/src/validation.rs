//! # Validation Module
//!
//! Input validation for product shipping data and quote requests.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Checkout form (TypeScript)                                   │
//! │  └── Immediate feedback on empty / malformed fields                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Listings before storage (validate_product, validate_user)         │
//! │  ├── Product shipping metadata (weight, flat rate, dimensions)         │
//! │  └── Request inputs (quantity, order value, currency)                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: SQLite constraints (NOT NULL, CHECK, FK)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use crafts_core::types::ProductShippingDetails;
//! use crafts_core::validation::{validate_quantity, validate_shipping_details};
//!
//! validate_quantity(3).unwrap();
//! validate_shipping_details(&ProductShippingDetails::calculated(1.5)).unwrap();
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{MarketProduct, MarketUser, ProductShippingDetails, ShippingType};
use crate::{
    MAX_DIMENSION_CM, MAX_LEAD_TIME_DAYS, MAX_ORDER_QUANTITY, MAX_PRICE_CENTS, MAX_WEIGHT_KG,
};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name: non-empty, at most 200 characters.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a user display name: non-empty, at most 100 characters.
pub fn validate_display_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "display_name".to_string(),
        });
    }

    if name.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "display_name".to_string(),
            max: 100,
        });
    }

    Ok(())
}

/// Validates an ISO 4217 currency code (three uppercase letters).
///
/// ## Example
/// ```rust
/// use crafts_core::validation::validate_currency;
///
/// assert!(validate_currency("EUR").is_ok());
/// assert!(validate_currency("eur").is_err());
/// assert!(validate_currency("EURO").is_err());
/// ```
pub fn validate_currency(code: &str) -> ValidationResult<()> {
    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "currency".to_string(),
        });
    }

    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(ValidationError::InvalidFormat {
            field: "currency".to_string(),
            reason: "must be a three-letter ISO 4217 code".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an order quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ORDER_QUANTITY
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ORDER_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ORDER_QUANTITY as i64,
        });
    }

    Ok(())
}

/// Validates a non-negative money amount (prices, rates, thresholds).
///
/// ## Example
/// ```rust
/// use crafts_core::money::Money;
/// use crafts_core::validation::validate_amount;
///
/// assert!(validate_amount("price", Money::from_cents(0)).is_ok());
/// assert!(validate_amount("price", Money::from_cents(-1)).is_err());
/// ```
pub fn validate_amount(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a listing amount (unit price, flat rate, threshold):
/// non-negative and at most [`MAX_PRICE_CENTS`].
///
/// ## Example
/// ```rust
/// use crafts_core::money::Money;
/// use crafts_core::validation::validate_price;
///
/// assert!(validate_price("price", Money::from_cents(4500)).is_ok());
/// assert!(validate_price("price", Money::from_cents(i64::MAX)).is_err());
/// ```
pub fn validate_price(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() || amount.cents() > MAX_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

// =============================================================================
// Shipping Metadata
// =============================================================================

/// Validates the shipping metadata attached to a product.
///
/// ## Rules
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  weight        finite, >= 0, <= MAX_WEIGHT_KG; > 0 when calculated     │
/// │  dimensions    finite, >= 0 and <= MAX_DIMENSION_CM on every side      │
/// │  flat_rate     required when flat; 0..=MAX_PRICE_CENTS                 │
/// │  threshold     0..=MAX_PRICE_CENTS when present                        │
/// │  lead time     <= MAX_LEAD_TIME_DAYS                                   │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_shipping_details(details: &ProductShippingDetails) -> ValidationResult<()> {
    if !details.weight.is_finite() || details.weight < 0.0 {
        return Err(ValidationError::InvalidFormat {
            field: "weight".to_string(),
            reason: "must be a finite, non-negative number".to_string(),
        });
    }

    if details.weight_grams() > MAX_WEIGHT_KG * 1000 {
        return Err(ValidationError::OutOfRange {
            field: "weight".to_string(),
            min: 0,
            max: MAX_WEIGHT_KG as i64,
        });
    }

    if details.shipping_type == ShippingType::Calculated && details.weight_grams() == 0 {
        return Err(ValidationError::MustBePositive {
            field: "weight".to_string(),
        });
    }

    if let Some(dims) = &details.dimensions {
        let sides = [dims.length, dims.width, dims.height];
        if sides.iter().any(|s| !s.is_finite() || *s < 0.0) {
            return Err(ValidationError::InvalidFormat {
                field: "dimensions".to_string(),
                reason: "every side must be a finite, non-negative number".to_string(),
            });
        }
        let cm = dims.unit.cm_per_unit();
        if sides.iter().any(|s| s * cm > MAX_DIMENSION_CM) {
            return Err(ValidationError::OutOfRange {
                field: "dimensions".to_string(),
                min: 0,
                max: MAX_DIMENSION_CM as i64,
            });
        }
    }

    match (details.shipping_type, details.flat_rate) {
        (ShippingType::Flat, None) => {
            return Err(ValidationError::Required {
                field: "flat_rate".to_string(),
            });
        }
        (_, Some(rate)) => validate_price("flat_rate", rate)?,
        (_, None) => {}
    }

    if let Some(threshold) = details.free_shipping_threshold {
        validate_price("free_shipping_threshold", threshold)?;
    }

    if details.lead_time_days > MAX_LEAD_TIME_DAYS {
        return Err(ValidationError::OutOfRange {
            field: "lead_time_days".to_string(),
            min: 0,
            max: MAX_LEAD_TIME_DAYS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Listings
// =============================================================================

/// Validates a product before it is stored.
pub fn validate_product(product: &MarketProduct) -> ValidationResult<()> {
    if product.id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }
    if product.seller_id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "seller_id".to_string(),
        });
    }
    validate_product_name(&product.name)?;
    validate_price("price", product.price)?;
    validate_currency(&product.currency)?;
    validate_shipping_details(&product.shipping)
}

/// Validates a user before it is stored.
pub fn validate_user(user: &MarketUser) -> ValidationResult<()> {
    if user.id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }
    validate_display_name(&user.display_name)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DimensionUnit, Dimensions};

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Walnut Dining Table").is_ok());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_ORDER_QUANTITY).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(MAX_ORDER_QUANTITY + 1).is_err());
    }

    #[test]
    fn test_flat_rate_required_for_flat_products() {
        let details = ProductShippingDetails::calculated(1.0).with_type(ShippingType::Flat);
        let err = validate_shipping_details(&details).unwrap_err();
        assert!(matches!(err, ValidationError::Required { ref field } if field == "flat_rate"));

        let details = ProductShippingDetails::flat(Money::from_cents(-5));
        assert!(validate_shipping_details(&details).is_err());

        let details = ProductShippingDetails::flat(Money::from_cents(995));
        assert!(validate_shipping_details(&details).is_ok());
    }

    #[test]
    fn test_calculated_products_need_weight() {
        let details = ProductShippingDetails::calculated(0.0);
        assert!(validate_shipping_details(&details).is_err());

        // Weightless is fine when weight does not drive the price
        let details = ProductShippingDetails::calculated(0.0).with_type(ShippingType::Free);
        assert!(validate_shipping_details(&details).is_ok());

        let details = ProductShippingDetails::calculated(f64::NAN);
        assert!(validate_shipping_details(&details).is_err());
    }

    #[test]
    fn test_dimensions_must_be_non_negative() {
        let mut details = ProductShippingDetails::calculated(1.0);
        details.dimensions = Some(Dimensions {
            length: 10.0,
            width: -1.0,
            height: 5.0,
            unit: DimensionUnit::Cm,
        });
        assert!(validate_shipping_details(&details).is_err());
    }

    #[test]
    fn test_weight_upper_bound() {
        let details = ProductShippingDetails::calculated((MAX_WEIGHT_KG + 1) as f64);
        assert!(validate_shipping_details(&details).is_err());
    }

    #[test]
    fn test_dimensions_upper_bound() {
        let mut details = ProductShippingDetails::calculated(1.0);
        details.dimensions = Some(Dimensions {
            length: 1_000_000.0,
            width: 1_000_000.0,
            height: 1_000_000.0,
            unit: DimensionUnit::Cm,
        });
        assert!(matches!(
            validate_shipping_details(&details),
            Err(ValidationError::OutOfRange { ref field, .. }) if field == "dimensions"
        ));

        // 400 in is just over 1000 cm
        details.dimensions = Some(Dimensions {
            length: 400.0,
            width: 10.0,
            height: 10.0,
            unit: DimensionUnit::In,
        });
        assert!(validate_shipping_details(&details).is_err());
    }

    #[test]
    fn test_price_bounds() {
        assert!(validate_price("price", Money::from_cents(MAX_PRICE_CENTS)).is_ok());
        assert!(validate_price("price", Money::from_cents(MAX_PRICE_CENTS + 1)).is_err());
        assert!(validate_price("price", Money::from_cents(-1)).is_err());

        let details = ProductShippingDetails::flat(Money::from_cents(i64::MAX));
        assert!(validate_shipping_details(&details).is_err());
    }

    #[test]
    fn test_validate_product_and_user() {
        use crate::types::{CountryCode, Role};
        use chrono::Utc;

        let mut product = MarketProduct {
            id: "p-1".to_string(),
            seller_id: "seller-1".to_string(),
            name: "Walnut Board".to_string(),
            description: None,
            price: Money::from_cents(4500),
            currency: "USD".to_string(),
            shipping: ProductShippingDetails::calculated(1.0),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(validate_product(&product).is_ok());

        product.currency = "dollars".to_string();
        assert!(validate_product(&product).is_err());
        product.currency = "USD".to_string();
        product.price = Money::from_cents(-100);
        assert!(validate_product(&product).is_err());
        product.price = Money::from_cents(4500);
        product.name = "  ".to_string();
        assert!(validate_product(&product).is_err());

        let mut user = MarketUser {
            id: "u-1".to_string(),
            display_name: "Ada Woodworks".to_string(),
            role: Role::Craftsman,
            country: CountryCode::parse("US").unwrap(),
            created_at: Utc::now(),
        };
        assert!(validate_user(&user).is_ok());
        user.display_name = String::new();
        assert!(validate_user(&user).is_err());
    }
}
