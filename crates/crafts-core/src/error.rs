//! # Error Types
//!
//! Domain-specific error types for crafts-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  crafts-core errors (this file)                                        │
//! │  ├── CoreError        - Shipping rule failures                         │
//! │  └── ValidationError  - Malformed product data or user input           │
//! │                                                                         │
//! │  crafts-db errors (separate crate)                                     │
//! │  ├── DbError          - Storage failures                               │
//! │  └── ConfigError      - Configuration loading                          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → QuoteError → UI alert             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::{CountryCode, ShippingMethod, ShippingZone};

// =============================================================================
// Core Error
// =============================================================================

/// Shipping rule errors.
///
/// None of these are retried. Each one ends the current computation cycle;
/// the next user input starts a fresh one.
#[derive(Debug, Error)]
pub enum CoreError {
    /// One of the two countries is not served by the zone map.
    ///
    /// ## User Workflow
    /// ```text
    /// Builder picks destination "AQ"
    ///      │
    ///      ▼
    /// zone_for(seller=US, destination=AQ) → None
    ///      │
    ///      ▼
    /// UnsupportedRoute → inline alert "Shipping unavailable to AQ"
    /// ```
    #[error("Shipping from {origin} to {destination} is not supported")]
    UnsupportedRoute {
        origin: CountryCode,
        destination: CountryCode,
    },

    /// The rate table has no entry for this zone/method pair.
    #[error("No {method} shipping rate for {zone} destinations")]
    MissingRate {
        zone: ShippingZone,
        method: ShippingMethod,
    },

    /// Shipping for this product is quoted by the seller, not calculated.
    #[error("Shipping for this product is arranged with the seller")]
    ManualQuote,

    /// The selected method is not offered for the current destination.
    #[error("{method} shipping is not available for this destination")]
    MethodUnavailable { method: ShippingMethod },

    /// The checkout total cannot be finalized while shipping is unknown.
    #[error("Shipping cost is not known yet: {reason}")]
    ShippingUnresolved { reason: String },

    /// A money computation left the `i64` cents range.
    #[error("Amount is too large to compute")]
    AmountOverflow,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any rule runs, so the calculator never sees malformed data.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID, invalid country code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
