//! # Data Store Capability
//!
//! The narrow interface the quote service needs: users (for the seller's
//! country) and products (for shipping metadata).
//!
//! ## Backends
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        trait DataStore                                  │
//! │                               │                                         │
//! │            ┌──────────────────┼──────────────────┐                      │
//! │            ▼                  ▼                  ▼                      │
//! │       Database           MemoryStore          AnyStore                  │
//! │   (SQLite, sqlx)     (RwLock<HashMap>)   (chosen by open_store          │
//! │                                           from StoreBackend)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both backends enforce the same rules:
//! - records pass `validate_product` / `validate_user` from crafts-core
//!   before anything is written (`DbError::Validation`)
//! - duplicate ids are `UniqueViolation`
//! - products need an existing seller (`ForeignKeyViolation`)
//! - storefront listings skip inactive products

use async_trait::async_trait;
use tracing::info;

use crafts_core::{MarketProduct, MarketUser};

use crate::config::{MarketConfig, StoreBackend};
use crate::error::DbResult;
use crate::memory::MemoryStore;
use crate::pool::Database;

/// Async access to marketplace users and products.
#[async_trait]
pub trait DataStore: Send + Sync {
    async fn insert_user(&self, user: &MarketUser) -> DbResult<MarketUser>;

    async fn get_user(&self, id: &str) -> DbResult<Option<MarketUser>>;

    async fn insert_product(&self, product: &MarketProduct) -> DbResult<MarketProduct>;

    /// Any product with this id, active or not.
    async fn get_product(&self, id: &str) -> DbResult<Option<MarketProduct>>;

    /// Active products of one seller, ordered by name.
    async fn list_products_by_seller(&self, seller_id: &str) -> DbResult<Vec<MarketProduct>>;

    async fn health_check(&self) -> bool;
}

// =============================================================================
// SQLite Backend
// =============================================================================

#[async_trait]
impl DataStore for Database {
    async fn insert_user(&self, user: &MarketUser) -> DbResult<MarketUser> {
        self.users().insert(user).await
    }

    async fn get_user(&self, id: &str) -> DbResult<Option<MarketUser>> {
        self.users().get_by_id(id).await
    }

    async fn insert_product(&self, product: &MarketProduct) -> DbResult<MarketProduct> {
        self.products().insert(product).await
    }

    async fn get_product(&self, id: &str) -> DbResult<Option<MarketProduct>> {
        self.products().get_by_id(id).await
    }

    async fn list_products_by_seller(&self, seller_id: &str) -> DbResult<Vec<MarketProduct>> {
        self.products().list_by_seller(seller_id).await
    }

    async fn health_check(&self) -> bool {
        Database::health_check(self).await
    }
}

// =============================================================================
// Runtime Selection
// =============================================================================

/// A store whose backend is picked from configuration at startup.
#[derive(Debug, Clone)]
pub enum AnyStore {
    Sqlite(Database),
    Memory(MemoryStore),
}

impl AnyStore {
    pub fn backend(&self) -> StoreBackend {
        match self {
            AnyStore::Sqlite(_) => StoreBackend::Sqlite,
            AnyStore::Memory(_) => StoreBackend::Memory,
        }
    }
}

/// Opens the backend named in `config.store.backend`.
///
/// ## Example
/// ```rust,ignore
/// let config = MarketConfig::load(None)?;
/// let store = open_store(&config).await?;
/// ```
pub async fn open_store(config: &MarketConfig) -> DbResult<AnyStore> {
    info!(backend = %config.store.backend, "Opening data store");

    match config.store.backend {
        StoreBackend::Sqlite => Ok(AnyStore::Sqlite(Database::new(config.db_config()).await?)),
        StoreBackend::Memory => Ok(AnyStore::Memory(MemoryStore::new())),
    }
}

#[async_trait]
impl DataStore for AnyStore {
    async fn insert_user(&self, user: &MarketUser) -> DbResult<MarketUser> {
        match self {
            AnyStore::Sqlite(db) => db.insert_user(user).await,
            AnyStore::Memory(mem) => mem.insert_user(user).await,
        }
    }

    async fn get_user(&self, id: &str) -> DbResult<Option<MarketUser>> {
        match self {
            AnyStore::Sqlite(db) => db.get_user(id).await,
            AnyStore::Memory(mem) => mem.get_user(id).await,
        }
    }

    async fn insert_product(&self, product: &MarketProduct) -> DbResult<MarketProduct> {
        match self {
            AnyStore::Sqlite(db) => db.insert_product(product).await,
            AnyStore::Memory(mem) => mem.insert_product(product).await,
        }
    }

    async fn get_product(&self, id: &str) -> DbResult<Option<MarketProduct>> {
        match self {
            AnyStore::Sqlite(db) => db.get_product(id).await,
            AnyStore::Memory(mem) => mem.get_product(id).await,
        }
    }

    async fn list_products_by_seller(&self, seller_id: &str) -> DbResult<Vec<MarketProduct>> {
        match self {
            AnyStore::Sqlite(db) => db.list_products_by_seller(seller_id).await,
            AnyStore::Memory(mem) => mem.list_products_by_seller(seller_id).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            AnyStore::Sqlite(db) => DataStore::health_check(db).await,
            AnyStore::Memory(mem) => mem.health_check().await,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::DbConfig;
    use chrono::Utc;
    use crafts_core::{CountryCode, Money, ProductShippingDetails, Role};

    fn seller() -> MarketUser {
        MarketUser {
            id: "seller-1".to_string(),
            display_name: "Ada Woodworks".to_string(),
            role: Role::Craftsman,
            country: CountryCode::parse("US").unwrap(),
            created_at: Utc::now(),
        }
    }

    fn product(id: &str, name: &str) -> MarketProduct {
        MarketProduct {
            id: id.to_string(),
            seller_id: "seller-1".to_string(),
            name: name.to_string(),
            description: None,
            price: Money::from_cents(2500),
            currency: "USD".to_string(),
            shipping: ProductShippingDetails::calculated(1.0),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// Behaviour every backend must share.
    async fn exercise(store: &impl DataStore) {
        assert!(store.health_check().await);

        let mut nameless = seller();
        nameless.display_name = "  ".to_string();
        assert!(matches!(
            store.insert_user(&nameless).await,
            Err(DbError::Validation(_))
        ));

        let orphan = product("p-0", "Orphan");
        assert!(matches!(
            store.insert_product(&orphan).await,
            Err(DbError::ForeignKeyViolation { .. })
        ));

        store.insert_user(&seller()).await.unwrap();
        assert!(matches!(
            store.insert_user(&seller()).await,
            Err(DbError::UniqueViolation { .. })
        ));

        // Rejected the same way whichever backend is behind the trait
        let mut invalid = product("p-bad", "Bad");
        invalid.price = Money::from_cents(-100);
        invalid.shipping.weight = -1.0;
        invalid.currency = "dollars".to_string();
        assert!(matches!(
            store.insert_product(&invalid).await,
            Err(DbError::Validation(_))
        ));
        let mut unnamed = product("p-bad", "");
        unnamed.shipping.flat_rate = Some(Money::from_cents(-5));
        assert!(matches!(
            store.insert_product(&unnamed).await,
            Err(DbError::Validation(_))
        ));
        assert!(store.get_product("p-bad").await.unwrap().is_none());

        store.insert_product(&product("p-2", "Bowl")).await.unwrap();
        store.insert_product(&product("p-1", "Arrow Rack")).await.unwrap();
        assert!(matches!(
            store.insert_product(&product("p-1", "Again")).await,
            Err(DbError::UniqueViolation { .. })
        ));

        let mut hidden = product("p-3", "Hidden");
        hidden.is_active = false;
        store.insert_product(&hidden).await.unwrap();

        let user = store.get_user("seller-1").await.unwrap().unwrap();
        assert_eq!(user.country.as_str(), "US");
        assert!(store.get_user("nobody").await.unwrap().is_none());

        let fetched = store.get_product("p-1").await.unwrap().unwrap();
        assert_eq!(fetched.name, "Arrow Rack");
        assert!(store.get_product("p-3").await.unwrap().is_some());
        assert!(store.get_product("p-9").await.unwrap().is_none());

        let listed = store.list_products_by_seller("seller-1").await.unwrap();
        let names: Vec<_> = listed.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Arrow Rack", "Bowl"]);
    }

    #[tokio::test]
    async fn test_sqlite_backend() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        exercise(&db).await;
    }

    #[tokio::test]
    async fn test_memory_backend() {
        exercise(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn test_open_store_memory() {
        let mut config = MarketConfig::default();
        config.store.backend = StoreBackend::Memory;

        let store = open_store(&config).await.unwrap();
        assert_eq!(store.backend(), StoreBackend::Memory);
        exercise(&store).await;
    }
}
