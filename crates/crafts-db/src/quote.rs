//! # Quote Service
//!
//! Loads a stored product and its seller, then runs the core shipping
//! functions for a destination.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  QuoteRequest { product_id, destination, method?, quantity }            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  store.get_product ──► ProductNotFound / ProductInactive                │
//! │  store.get_user    ──► SellerNotFound / NotASeller                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  available_shipping_methods(destination, seller country, product)       │
//! │       │                                                                 │
//! │       ├── []                 → cost Unknown ("not shipped to XX")       │
//! │       ├── method not offered → MethodUnavailable                        │
//! │       ▼                                                                 │
//! │  calculate_shipping_cost ──► Free | Amount | Unknown (manual, gaps)     │
//! │  estimate_delivery_with_lead_time                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ShippingQuote { methods, method, cost, delivery, currency, ... }       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crafts_core::checkout::{order_value, OrderSummary};
use crafts_core::shipping::{
    available_shipping_methods, calculate_shipping_cost, estimate_delivery_with_lead_time,
    ShippingRequest, ShippingRules,
};
use crafts_core::validation::validate_quantity;
use crafts_core::{
    CoreError, CountryCode, DeliveryEstimate, MarketProduct, MarketUser, Money, ShippingEstimate,
    ShippingMethod,
};

use crate::error::DbError;
use crate::store::DataStore;

// =============================================================================
// Errors
// =============================================================================

/// Why no quote could be produced at all.
///
/// Pricing problems (manual quotes, rate gaps, unserved routes) are NOT
/// errors: they come back as `ShippingEstimate::Unknown` inside the quote.
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Product {0} is no longer listed")]
    ProductInactive(String),

    #[error("Seller not found: {0}")]
    SellerNotFound(String),

    #[error("User {0} cannot sell products")]
    NotASeller(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] DbError),
}

pub type QuoteResult<T> = Result<T, QuoteError>;

// =============================================================================
// Request / Response
// =============================================================================

#[derive(Debug, Clone)]
pub struct QuoteRequest {
    pub product_id: String,
    pub destination: CountryCode,
    /// `None` quotes the first available method.
    pub method: Option<ShippingMethod>,
    pub quantity: u32,
}

impl QuoteRequest {
    pub fn new(product_id: impl Into<String>, destination: CountryCode) -> Self {
        QuoteRequest {
            product_id: product_id.into(),
            destination,
            method: None,
            quantity: 1,
        }
    }

    pub fn method(mut self, method: ShippingMethod) -> Self {
        self.method = Some(method);
        self
    }

    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }
}

/// Shipping quote for one product line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingQuote {
    pub product_id: String,
    pub origin: CountryCode,
    pub destination: CountryCode,
    /// Every method the builder may choose; empty when not shipped there.
    pub methods: Vec<ShippingMethod>,
    /// Method the cost and delivery apply to.
    pub method: Option<ShippingMethod>,
    pub cost: ShippingEstimate,
    /// Transit plus workshop lead time. `None` without a method.
    pub delivery: Option<DeliveryEstimate>,
    pub order_value: Money,
    pub currency: String,
}

// =============================================================================
// Service
// =============================================================================

#[derive(Debug, Clone)]
pub struct QuoteService<S: DataStore> {
    store: S,
    rules: ShippingRules,
}

impl<S: DataStore> QuoteService<S> {
    pub fn new(store: S, rules: ShippingRules) -> Self {
        QuoteService { store, rules }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn rules(&self) -> &ShippingRules {
        &self.rules
    }

    /// Produces a quote for a stored product.
    pub async fn quote(&self, request: &QuoteRequest) -> QuoteResult<ShippingQuote> {
        debug!(
            product_id = %request.product_id,
            destination = %request.destination,
            method = ?request.method,
            quantity = request.quantity,
            "Quote requested"
        );

        validate_quantity(request.quantity).map_err(CoreError::from)?;
        let (product, seller) = self.load(&request.product_id).await?;
        self.price(request, product, seller)
    }

    /// Quote plus the checkout summary it produces.
    pub async fn quote_with_summary(
        &self,
        request: &QuoteRequest,
    ) -> QuoteResult<(ShippingQuote, OrderSummary)> {
        validate_quantity(request.quantity).map_err(CoreError::from)?;
        let (product, seller) = self.load(&request.product_id).await?;

        let summary = OrderSummary::for_product(&product, request.quantity)?;
        let quote = self.price(request, product, seller)?;
        let summary = summary.with_shipping(quote.cost.clone());
        Ok((quote, summary))
    }

    fn price(
        &self,
        request: &QuoteRequest,
        product: MarketProduct,
        seller: MarketUser,
    ) -> QuoteResult<ShippingQuote> {
        let methods =
            available_shipping_methods(&request.destination, &seller.country, &product.shipping);
        let value = order_value(product.price, request.quantity)?;

        let method = match request.method {
            Some(method) if !methods.is_empty() && !methods.contains(&method) => {
                return Err(CoreError::MethodUnavailable { method }.into());
            }
            Some(method) if !methods.is_empty() => Some(method),
            _ => methods.first().copied(),
        };

        let Some(method) = method else {
            warn!(
                product_id = %product.id,
                origin = %seller.country,
                destination = %request.destination,
                "Route not served"
            );
            let cost = ShippingEstimate::unknown(
                CoreError::UnsupportedRoute {
                    origin: seller.country.clone(),
                    destination: request.destination.clone(),
                }
                .to_string(),
            );
            return Ok(ShippingQuote {
                product_id: product.id,
                origin: seller.country,
                destination: request.destination.clone(),
                methods,
                method: None,
                cost,
                delivery: None,
                order_value: value,
                currency: product.currency,
            });
        };

        let shipping_request = ShippingRequest {
            product: &product.shipping,
            destination: &request.destination,
            seller: &seller.country,
            method,
            order_value: value,
            quantity: request.quantity,
        };

        let cost = match calculate_shipping_cost(&shipping_request, &self.rules) {
            Ok(amount) => ShippingEstimate::from_cost(amount),
            Err(err) => {
                warn!(product_id = %product.id, method = %method, error = %err, "Shipping cost unknown");
                ShippingEstimate::unknown(err.to_string())
            }
        };

        let delivery = estimate_delivery_with_lead_time(
            &request.destination,
            &seller.country,
            method,
            product.shipping.lead_time_days,
            &self.rules,
        );

        info!(
            product_id = %product.id,
            method = %method,
            cost = ?cost,
            delivery = %delivery,
            "Quote computed"
        );

        Ok(ShippingQuote {
            product_id: product.id,
            origin: seller.country,
            destination: request.destination.clone(),
            methods,
            method: Some(method),
            cost,
            delivery: Some(delivery),
            order_value: value,
            currency: product.currency,
        })
    }

    async fn load(&self, product_id: &str) -> QuoteResult<(MarketProduct, MarketUser)> {
        let product = self
            .store
            .get_product(product_id)
            .await?
            .ok_or_else(|| QuoteError::ProductNotFound(product_id.to_string()))?;

        if !product.is_active {
            return Err(QuoteError::ProductInactive(product.id));
        }

        let seller = self
            .store
            .get_user(&product.seller_id)
            .await?
            .ok_or_else(|| QuoteError::SellerNotFound(product.seller_id.clone()))?;

        if !seller.role.can_sell() {
            return Err(QuoteError::NotASeller(seller.id));
        }

        Ok((product, seller))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
