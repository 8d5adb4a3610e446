//! # Shipping Calculator
//!
//! Drives the resolver, cost calculator and delivery estimator from the
//! checkout form's inputs, and reports every result to a listener.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  country:  unset ──set_country()──► set                                 │
//! │                                      │ methods re-resolved              │
//! │                                      │ stale method cleared             │
//! │                                      ▼                                  │
//! │  method:   unset ──set_method()───► set (must be in available methods)  │
//! │                                      │                                  │
//! │                                      ▼                                  │
//! │  estimate: Absent ──recompute()──► Computed { cost, delivery }          │
//! │                          │                                              │
//! │                          └───────► Failed { kind, message }             │
//! │                                                                         │
//! │  After EVERY recompute the listener receives a ShippingEstimate:        │
//! │    Computed → Free | Amount        Absent / Failed → Unknown            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything is synchronous; each input change is fully processed before the
//! call returns.

use std::fmt;

use serde::Serialize;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::shipping::{
    available_shipping_methods, calculate_shipping_cost, estimate_delivery_with_lead_time,
    ShippingRequest, ShippingRules,
};
use crate::types::{
    CostEstimate, CountryCode, DeliveryEstimate, ProductShippingDetails, ShippingEstimate,
    ShippingMethod,
};

// =============================================================================
// Estimate State
// =============================================================================

/// Why a recomputation did not produce a price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// No method reaches the destination. Rendered as an inline notice.
    UnsupportedRoute,
    /// Rate table gap. Rendered as an error alert.
    MissingRate,
    /// Seller will quote shipping after the order.
    ManualQuote,
    /// Malformed product data or request input.
    InvalidInput,
}

impl FailureKind {
    fn of(err: &CoreError) -> Self {
        match err {
            CoreError::UnsupportedRoute { .. } => FailureKind::UnsupportedRoute,
            CoreError::MissingRate { .. } => FailureKind::MissingRate,
            CoreError::ManualQuote => FailureKind::ManualQuote,
            CoreError::MethodUnavailable { .. }
            | CoreError::ShippingUnresolved { .. }
            | CoreError::AmountOverflow
            | CoreError::Validation(_) => FailureKind::InvalidInput,
        }
    }
}

/// Derived estimate of the calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum EstimateState {
    /// Not enough input yet (no country or no method).
    Absent,
    Computed {
        cost: CostEstimate,
        delivery: DeliveryEstimate,
    },
    Failed {
        kind: FailureKind,
        message: String,
    },
}

impl EstimateState {
    /// What the enclosing checkout form is told.
    pub fn to_estimate(&self) -> ShippingEstimate {
        match self {
            EstimateState::Absent => ShippingEstimate::unknown("destination or method not chosen"),
            EstimateState::Computed { cost, .. } => ShippingEstimate::from_cost(cost.amount),
            EstimateState::Failed { message, .. } => ShippingEstimate::unknown(message.clone()),
        }
    }
}

// =============================================================================
// Shipping Calculator
// =============================================================================

type EstimateListener = Box<dyn FnMut(&ShippingEstimate) + Send>;

/// Reactive shipping form state for one product.
///
/// ## Usage
/// ```rust
/// use std::sync::{Arc, Mutex};
/// use crafts_core::calculator::ShippingCalculator;
/// use crafts_core::shipping::ShippingRules;
/// use crafts_core::types::{CountryCode, ProductShippingDetails, ShippingEstimate, ShippingMethod};
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&seen);
///
/// let mut calc = ShippingCalculator::new(
///     ProductShippingDetails::calculated(1.0),
///     CountryCode::parse("US").unwrap(),
///     "USD",
///     ShippingRules::default(),
/// )
/// .on_estimate_update(move |estimate| sink.lock().unwrap().push(estimate.clone()));
///
/// calc.set_country(CountryCode::parse("US").unwrap());
/// calc.set_method(ShippingMethod::Standard).unwrap();
///
/// let seen = seen.lock().unwrap();
/// assert!(!seen[0].is_known());
/// assert_eq!(seen[1].amount().unwrap().cents(), 599);
/// ```
pub struct ShippingCalculator {
    product: ProductShippingDetails,
    seller: CountryCode,
    currency: String,
    rules: ShippingRules,
    quantity: u32,
    order_value: Money,

    country: Option<CountryCode>,
    method: Option<ShippingMethod>,
    methods: Vec<ShippingMethod>,
    state: EstimateState,

    listener: Option<EstimateListener>,
}

impl ShippingCalculator {
    pub fn new(
        product: ProductShippingDetails,
        seller: CountryCode,
        currency: impl Into<String>,
        rules: ShippingRules,
    ) -> Self {
        ShippingCalculator {
            product,
            seller,
            currency: currency.into(),
            rules,
            quantity: 1,
            order_value: Money::zero(),
            country: None,
            method: None,
            methods: Vec::new(),
            state: EstimateState::Absent,
            listener: None,
        }
    }

    /// Registers the callback that receives every recomputed estimate.
    pub fn on_estimate_update<F>(mut self, listener: F) -> Self
    where
        F: FnMut(&ShippingEstimate) + Send + 'static,
    {
        self.listener = Some(Box::new(listener));
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_order_value(mut self, order_value: Money) -> Self {
        self.order_value = order_value;
        self
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Sets the destination, re-resolves methods and recomputes.
    ///
    /// A previously selected method that is no longer offered is cleared.
    pub fn set_country(&mut self, country: CountryCode) -> &EstimateState {
        self.methods = available_shipping_methods(&country, &self.seller, &self.product);
        if let Some(method) = self.method {
            if !self.methods.contains(&method) {
                self.method = None;
            }
        }
        self.country = Some(country);
        self.recompute()
    }

    /// Clears the destination (and with it the method list).
    pub fn clear_country(&mut self) -> &EstimateState {
        self.country = None;
        self.method = None;
        self.methods.clear();
        self.recompute()
    }

    /// Selects a method. Rejected when it is not currently available.
    pub fn set_method(&mut self, method: ShippingMethod) -> CoreResult<&EstimateState> {
        if !self.methods.contains(&method) {
            return Err(CoreError::MethodUnavailable { method });
        }
        self.method = Some(method);
        Ok(self.recompute())
    }

    pub fn set_quantity(&mut self, quantity: u32) -> &EstimateState {
        self.quantity = quantity;
        self.recompute()
    }

    pub fn set_order_value(&mut self, order_value: Money) -> &EstimateState {
        self.order_value = order_value;
        self.recompute()
    }

    /// Re-evaluates the estimate from the current inputs and notifies the
    /// listener.
    pub fn recompute(&mut self) -> &EstimateState {
        self.state = self.evaluate();
        let estimate = self.state.to_estimate();
        if let Some(listener) = self.listener.as_mut() {
            listener(&estimate);
        }
        &self.state
    }

    fn evaluate(&self) -> EstimateState {
        let Some(country) = &self.country else {
            return EstimateState::Absent;
        };

        if self.methods.is_empty() {
            let err = CoreError::UnsupportedRoute {
                origin: self.seller.clone(),
                destination: country.clone(),
            };
            return EstimateState::Failed {
                kind: FailureKind::UnsupportedRoute,
                message: err.to_string(),
            };
        }

        let Some(method) = self.method else {
            return EstimateState::Absent;
        };

        let request = ShippingRequest {
            product: &self.product,
            destination: country,
            seller: &self.seller,
            method,
            order_value: self.order_value,
            quantity: self.quantity,
        };

        match calculate_shipping_cost(&request, &self.rules) {
            Ok(amount) => EstimateState::Computed {
                cost: CostEstimate {
                    amount,
                    currency: self.currency.clone(),
                },
                delivery: estimate_delivery_with_lead_time(
                    country,
                    &self.seller,
                    method,
                    self.product.lead_time_days,
                    &self.rules,
                ),
            },
            Err(err) => EstimateState::Failed {
                kind: FailureKind::of(&err),
                message: err.to_string(),
            },
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn country(&self) -> Option<&CountryCode> {
        self.country.as_ref()
    }

    pub fn method(&self) -> Option<ShippingMethod> {
        self.method
    }

    pub fn available_methods(&self) -> &[ShippingMethod] {
        &self.methods
    }

    pub fn state(&self) -> &EstimateState {
        &self.state
    }

    pub fn estimate(&self) -> ShippingEstimate {
        self.state.to_estimate()
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

impl fmt::Debug for ShippingCalculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShippingCalculator")
            .field("seller", &self.seller)
            .field("country", &self.country)
            .field("method", &self.method)
            .field("methods", &self.methods)
            .field("quantity", &self.quantity)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ShippingType;
    use std::sync::{Arc, Mutex};

    fn cc(code: &str) -> CountryCode {
        CountryCode::parse(code).unwrap()
    }

    fn calculator(product: ProductShippingDetails) -> (ShippingCalculator, Arc<Mutex<Vec<ShippingEstimate>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let calc = ShippingCalculator::new(product, cc("US"), "USD", ShippingRules::default())
            .on_estimate_update(move |e| sink.lock().unwrap().push(e.clone()));
        (calc, seen)
    }

    #[test]
    fn test_starts_absent() {
        let (calc, seen) = calculator(ProductShippingDetails::calculated(1.0));
        assert_eq!(calc.state(), &EstimateState::Absent);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_country_then_method_computes() {
        let (mut calc, seen) = calculator(ProductShippingDetails::calculated(2.0));

        assert_eq!(calc.set_country(cc("US")), &EstimateState::Absent);
        assert_eq!(calc.available_methods().len(), 3);

        let state = calc.set_method(ShippingMethod::Overnight).unwrap().clone();
        match state {
            EstimateState::Computed { cost, delivery } => {
                assert_eq!(cost.amount.cents(), 3499);
                assert_eq!(cost.currency, "USD");
                assert_eq!(delivery, DeliveryEstimate::new(1, 1));
            }
            other => panic!("expected computed estimate, got {other:?}"),
        }

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1].amount(), Some(Money::from_cents(3499)));
    }

    #[test]
    fn test_country_change_clears_stale_method() {
        let (mut calc, _) = calculator(ProductShippingDetails::calculated(1.0));
        calc.set_country(cc("US"));
        calc.set_method(ShippingMethod::Overnight).unwrap();

        calc.set_country(cc("CA"));
        assert_eq!(calc.method(), None);
        assert_eq!(calc.state(), &EstimateState::Absent);

        // Still-valid methods survive a country change
        calc.set_method(ShippingMethod::Standard).unwrap();
        calc.set_country(cc("DE"));
        assert_eq!(calc.method(), Some(ShippingMethod::Standard));
        assert!(matches!(calc.state(), EstimateState::Computed { .. }));
    }

    #[test]
    fn test_unavailable_method_rejected() {
        let (mut calc, _) = calculator(ProductShippingDetails::calculated(1.0));
        assert!(calc.set_method(ShippingMethod::Standard).is_err());

        calc.set_country(cc("DE"));
        let err = calc.set_method(ShippingMethod::Express).unwrap_err();
        assert!(matches!(err, CoreError::MethodUnavailable { .. }));
        assert_eq!(calc.method(), None);
    }

    #[test]
    fn test_unsupported_route_reports_unknown_not_zero() {
        let (mut calc, seen) = calculator(ProductShippingDetails::calculated(1.0));
        let state = calc.set_country(cc("AQ")).clone();
        assert!(matches!(
            state,
            EstimateState::Failed {
                kind: FailureKind::UnsupportedRoute,
                ..
            }
        ));
        let last = seen.lock().unwrap().last().cloned().unwrap();
        assert!(!last.is_known());
        assert_eq!(last.amount(), None);
    }

    #[test]
    fn test_manual_product_is_unknown() {
        let product = ProductShippingDetails::calculated(1.0).with_type(ShippingType::Manual);
        let (mut calc, _) = calculator(product);
        calc.set_country(cc("DE"));
        assert_eq!(calc.available_methods(), &[ShippingMethod::Manual]);
        calc.set_method(ShippingMethod::Manual).unwrap();
        assert!(matches!(
            calc.state(),
            EstimateState::Failed {
                kind: FailureKind::ManualQuote,
                ..
            }
        ));
    }

    #[test]
    fn test_quantity_and_order_value_recompute() {
        let (mut calc, seen) = calculator(ProductShippingDetails::calculated(1.0));
        calc.set_country(cc("US"));
        calc.set_method(ShippingMethod::Standard).unwrap();

        calc.set_quantity(3);
        assert_eq!(calc.estimate().amount(), Some(Money::from_cents(1199)));

        calc.set_quantity(0);
        assert!(matches!(
            calc.state(),
            EstimateState::Failed {
                kind: FailureKind::InvalidInput,
                ..
            }
        ));

        let mut product = ProductShippingDetails::calculated(1.0);
        product.free_shipping_threshold = Some(Money::from_cents(5000));
        let (mut calc, _) = calculator(product);
        calc.set_country(cc("US"));
        calc.set_method(ShippingMethod::Standard).unwrap();
        calc.set_order_value(Money::from_cents(6000));
        assert_eq!(calc.estimate(), ShippingEstimate::Free);

        assert!(seen.lock().unwrap().len() >= 4);
    }

    #[test]
    fn test_clear_country_resets() {
        let (mut calc, _) = calculator(ProductShippingDetails::calculated(1.0));
        calc.set_country(cc("US"));
        calc.set_method(ShippingMethod::Express).unwrap();
        calc.clear_country();
        assert_eq!(calc.country(), None);
        assert_eq!(calc.method(), None);
        assert!(calc.available_methods().is_empty());
        assert_eq!(calc.state(), &EstimateState::Absent);
    }

    #[test]
    fn test_lead_time_in_delivery() {
        let mut product = ProductShippingDetails::calculated(1.0);
        product.lead_time_days = 4;
        let (mut calc, _) = calculator(product);
        calc.set_country(cc("US"));
        calc.set_method(ShippingMethod::Standard).unwrap();
        match calc.state() {
            EstimateState::Computed { delivery, .. } => {
                assert_eq!(*delivery, DeliveryEstimate::new(7, 11));
            }
            other => panic!("expected computed estimate, got {other:?}"),
        }
    }
}
