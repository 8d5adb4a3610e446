//! # Product Repository
//!
//! Products and the shipping metadata the calculator reads.
//!
//! ## Row Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  products row                         MarketProduct                     │
//! │  ────────────                         ─────────────                     │
//! │  price_cents INTEGER          ──►     price: Money                      │
//! │  weight, weight_unit          ──►     shipping.weight / weight_unit     │
//! │  length, width, height,       ──►     shipping.dimensions               │
//! │    dimension_unit                       (Some only if all three set)    │
//! │  shipping_type TEXT           ──►     shipping.shipping_type (FromStr)  │
//! │  flat_rate_cents              ──►     shipping.flat_rate                │
//! │  free_shipping_threshold_cents ─►     shipping.free_shipping_threshold  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crafts_core::validation::validate_product;
use crafts_core::{
    DimensionUnit, Dimensions, MarketProduct, Money, ProductShippingDetails, ShippingType,
    WeightUnit,
};

use crate::error::{DbError, DbResult};

const PRODUCT_COLUMNS: &str = r#"
    id, seller_id, name, description, price_cents, currency,
    weight, weight_unit, length, width, height, dimension_unit,
    shipping_type, flat_rate_cents, lead_time_days, free_shipping_threshold_cents,
    is_active, created_at, updated_at
"#;

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: String,
    seller_id: String,
    name: String,
    description: Option<String>,
    price_cents: i64,
    currency: String,
    weight: f64,
    weight_unit: String,
    length: Option<f64>,
    width: Option<f64>,
    height: Option<f64>,
    dimension_unit: Option<String>,
    shipping_type: String,
    flat_rate_cents: Option<i64>,
    lead_time_days: i64,
    free_shipping_threshold_cents: Option<i64>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for MarketProduct {
    type Error = DbError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let corrupt = |reason: &dyn std::fmt::Display| DbError::corrupt("Product", &row.id, reason);

        let weight_unit: WeightUnit = row.weight_unit.parse().map_err(|e| corrupt(&e))?;
        let shipping_type: ShippingType = row.shipping_type.parse().map_err(|e| corrupt(&e))?;
        let lead_time_days = u32::try_from(row.lead_time_days).map_err(|e| corrupt(&e))?;

        let dimensions = match (row.length, row.width, row.height) {
            (Some(length), Some(width), Some(height)) => {
                let unit = match row.dimension_unit.as_deref() {
                    Some(raw) => raw.parse::<DimensionUnit>().map_err(|e| corrupt(&e))?,
                    None => DimensionUnit::default(),
                };
                Some(Dimensions {
                    length,
                    width,
                    height,
                    unit,
                })
            }
            _ => None,
        };

        let shipping = ProductShippingDetails {
            weight: row.weight,
            weight_unit,
            dimensions,
            shipping_type,
            flat_rate: row.flat_rate_cents.map(Money::from_cents),
            lead_time_days,
            free_shipping_threshold: row.free_shipping_threshold_cents.map(Money::from_cents),
        };

        Ok(MarketProduct {
            id: row.id,
            seller_id: row.seller_id,
            name: row.name,
            description: row.description,
            price: Money::from_cents(row.price_cents),
            currency: row.currency,
            shipping,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
/// let product = repo.get_by_id("uuid-here").await?;
/// let storefront = repo.list_by_seller("seller-uuid").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Gets a product by id, active or not.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<MarketProduct>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1");
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(MarketProduct::try_from).transpose()
    }

    /// Active products of one seller, ordered by name.
    pub async fn list_by_seller(&self, seller_id: &str) -> DbResult<Vec<MarketProduct>> {
        debug!(seller_id = %seller_id, "Listing storefront products");

        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE seller_id = ?1 AND is_active = 1 ORDER BY name"
        );
        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(seller_id)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(MarketProduct::try_from).collect()
    }

    /// Inserts a product.
    ///
    /// ## Returns
    /// * `Err(DbError::Validation)` - listing fails `validate_product`
    /// * `Err(DbError::UniqueViolation)` - id already exists
    /// * `Err(DbError::ForeignKeyViolation)` - seller does not exist
    pub async fn insert(&self, product: &MarketProduct) -> DbResult<MarketProduct> {
        debug!(id = %product.id, seller_id = %product.seller_id, "Inserting product");
        validate_product(product)?;

        let shipping = &product.shipping;
        let dims = shipping.dimensions;

        sqlx::query(
            r#"
            INSERT INTO products (
                id, seller_id, name, description, price_cents, currency,
                weight, weight_unit, length, width, height, dimension_unit,
                shipping_type, flat_rate_cents, lead_time_days, free_shipping_threshold_cents,
                is_active, created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6,
                ?7, ?8, ?9, ?10, ?11, ?12,
                ?13, ?14, ?15, ?16,
                ?17, ?18, ?19
            )
            "#,
        )
        .bind(&product.id)
        .bind(&product.seller_id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price.cents())
        .bind(&product.currency)
        .bind(shipping.weight)
        .bind(shipping.weight_unit.as_str())
        .bind(dims.map(|d| d.length))
        .bind(dims.map(|d| d.width))
        .bind(dims.map(|d| d.height))
        .bind(dims.map(|d| d.unit.as_str()))
        .bind(shipping.shipping_type.as_str())
        .bind(shipping.flat_rate.map(|m| m.cents()))
        .bind(i64::from(shipping.lead_time_days))
        .bind(shipping.free_shipping_threshold.map(|m| m.cents()))
        .bind(product.is_active)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => DbError::duplicate(field, &product.id),
            other => other,
        })?;

        Ok(product.clone())
    }
}

/// New product id (UUID v4).
pub fn generate_product_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
