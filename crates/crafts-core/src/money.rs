//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SHIPPING MATH WITHOUT DRIFT                                            │
//! │                                                                         │
//! │  A shipping price goes through several scaling steps:                   │
//! │    base rate → weight surcharge → additional-unit discount → total      │
//! │                                                                         │
//! │  With floats every step can add a fraction of a cent of error, and the  │
//! │  checkout total no longer matches the sum of its lines.                 │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents + Basis Points                             │
//! │    Every fractional scale is expressed in basis points (1/10000) and   │
//! │    rounded half-up to the cent at that exact boundary.                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use crafts_core::money::Money;
//!
//! let base = Money::from_cents(1499);   // 14.99
//! let half = base.apply_bps(5_000)?;    // 50% → 7.50 (7.495 rounded up)
//! assert_eq!(half.cents(), 750);
//! # Ok::<(), crafts_core::CoreError>(())
//! ```
//!
//! ## Overflow
//! The scaling helpers (`apply_bps`, `per_thousandth`, `multiply_quantity`,
//! `try_add`) return [`CoreError::AmountOverflow`] instead of wrapping. A
//! price that does not fit in `i64` cents is never reported as free.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

/// Denominator for basis-point scaling (10000 bps = 100%).
pub const BPS_DENOMINATOR: i64 = 10_000;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents for USD/EUR).
///
/// ## Design Decisions
/// - **i64 (signed)**: arithmetic can go through negative intermediates;
///   values handed to callers by the shipping calculator are never negative
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **No currency field**: the currency travels next to the amount in
///   [`crate::types::CostEstimate`]; all math within one quote is single-currency
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  RateEntry.base ──► unit shipping cost ──► quantity scaling ──┐         │
/// │                                                               ▼         │
/// │  Product.price × quantity ──► OrderSummary.subtotal ──► OrderSummary.total
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use crafts_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// ## Example
    /// ```rust
    /// use crafts_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(24, 99).cents(), 2499);
    /// assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use crafts_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(4500);
    /// assert_eq!(unit_price.multiply_quantity(3).unwrap().cents(), 13500);
    /// assert!(Money::from_cents(i64::MAX).multiply_quantity(2).is_err());
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: i64) -> CoreResult<Money> {
        self.0
            .checked_mul(qty)
            .map(Money)
            .ok_or(CoreError::AmountOverflow)
    }

    /// Adds two amounts, failing instead of wrapping.
    #[inline]
    pub fn try_add(&self, other: Money) -> CoreResult<Money> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or(CoreError::AmountOverflow)
    }

    /// Scales the amount by a basis-point factor, rounding half-up.
    ///
    /// ## Rounding
    /// `(amount * bps + 5000) / 10000` on `i128`, so 0.5 cent always rounds
    /// away from zero for positive amounts. Used for the additional-unit
    /// discount and any other percentage-style scaling.
    ///
    /// ## Example
    /// ```rust
    /// use crafts_core::money::Money;
    ///
    /// let unit = Money::from_cents(1001);
    /// assert_eq!(unit.apply_bps(5_000).unwrap().cents(), 501); // 500.5 → 501
    /// assert_eq!(unit.apply_bps(10_000).unwrap().cents(), 1001);
    /// ```
    pub fn apply_bps(&self, bps: u32) -> CoreResult<Money> {
        let scaled = (i128::from(self.0) * i128::from(bps) + i128::from(BPS_DENOMINATOR / 2))
            / i128::from(BPS_DENOMINATOR);
        Money::from_i128(scaled)
    }

    /// Multiplies a per-unit price by a fractional quantity expressed in
    /// thousandths (e.g. grams for a per-kilogram rate), rounding half-up.
    ///
    /// ## Example
    /// ```rust
    /// use crafts_core::money::Money;
    ///
    /// let per_kg = Money::from_cents(400);
    /// // 1.25 kg → 5.00
    /// assert_eq!(per_kg.per_thousandth(1_250).unwrap().cents(), 500);
    /// // 0.001 kg → 0.004 → 0.00
    /// assert_eq!(per_kg.per_thousandth(1).unwrap().cents(), 0);
    /// ```
    pub fn per_thousandth(&self, thousandths: u64) -> CoreResult<Money> {
        let scaled = (i128::from(self.0) * i128::from(thousandths) + 500) / 1_000;
        Money::from_i128(scaled)
    }

    fn from_i128(cents: i128) -> CoreResult<Money> {
        i64::try_from(cents)
            .map(Money)
            .map_err(|_| CoreError::AmountOverflow)
    }

    /// Clamps negative values to zero.
    ///
    /// Every cost that leaves the shipping calculator passes through this.
    #[inline]
    pub const fn non_negative(self) -> Money {
        if self.0 < 0 {
            Money(0)
        } else {
            self
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders `12.34` / `-5.50`. Currency symbols belong to the UI layer.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
