//! # In-Memory Store
//!
//! Process-local [`DataStore`] for tests, demos and `CRAFTS_STORE_BACKEND=memory`.
//! Clones share the same maps.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crafts_core::validation::{validate_product, validate_user};
use crafts_core::{MarketProduct, MarketUser};

use crate::error::{DbError, DbResult};
use crate::store::DataStore;

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<String, MarketUser>,
    products: HashMap<String, MarketProduct>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored `(users, products)`.
    pub async fn counts(&self) -> (usize, usize) {
        let tables = self.tables.read().await;
        (tables.users.len(), tables.products.len())
    }
}

#[async_trait]
impl DataStore for MemoryStore {
    async fn insert_user(&self, user: &MarketUser) -> DbResult<MarketUser> {
        debug!(id = %user.id, role = %user.role, "Inserting user (memory)");
        validate_user(user)?;

        let mut tables = self.tables.write().await;
        if tables.users.contains_key(&user.id) {
            return Err(DbError::duplicate("users.id", &user.id));
        }
        tables.users.insert(user.id.clone(), user.clone());
        Ok(user.clone())
    }

    async fn get_user(&self, id: &str) -> DbResult<Option<MarketUser>> {
        Ok(self.tables.read().await.users.get(id).cloned())
    }

    async fn insert_product(&self, product: &MarketProduct) -> DbResult<MarketProduct> {
        debug!(id = %product.id, seller_id = %product.seller_id, "Inserting product (memory)");
        validate_product(product)?;

        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&product.seller_id) {
            return Err(DbError::ForeignKeyViolation {
                message: format!("seller {} does not exist", product.seller_id),
            });
        }
        if tables.products.contains_key(&product.id) {
            return Err(DbError::duplicate("products.id", &product.id));
        }
        tables.products.insert(product.id.clone(), product.clone());
        Ok(product.clone())
    }

    async fn get_product(&self, id: &str) -> DbResult<Option<MarketProduct>> {
        Ok(self.tables.read().await.products.get(id).cloned())
    }

    async fn list_products_by_seller(&self, seller_id: &str) -> DbResult<Vec<MarketProduct>> {
        let tables = self.tables.read().await;
        let mut products: Vec<MarketProduct> = tables
            .products
            .values()
            .filter(|p| p.seller_id == seller_id && p.is_active)
            .cloned()
            .collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crafts_core::{CountryCode, Role};

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = MemoryStore::new();
        let other = store.clone();

        other
            .insert_user(&MarketUser {
                id: "u-1".to_string(),
                display_name: "Bea Ceramics".to_string(),
                role: Role::Craftsman,
                country: CountryCode::parse("DE").unwrap(),
                created_at: Utc::now(),
            })
            .await
            .unwrap();

        assert_eq!(store.counts().await, (1, 0));
        assert!(store.get_user("u-1").await.unwrap().is_some());
    }
}
