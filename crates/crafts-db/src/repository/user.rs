//! # User Repository
//!
//! Marketplace accounts. Only the fields shipping needs are stored: the role
//! (who may sell) and the country (where a seller's parcels leave from).

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crafts_core::validation::validate_user;
use crafts_core::{CountryCode, MarketUser, Role};

use crate::error::{DbError, DbResult};

/// `users` row as stored. Enum columns are TEXT.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: String,
    display_name: String,
    role: String,
    country: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for MarketUser {
    type Error = DbError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role: Role = row
            .role
            .parse()
            .map_err(|e| DbError::corrupt("User", &row.id, e))?;
        let country =
            CountryCode::parse(&row.country).map_err(|e| DbError::corrupt("User", &row.id, e))?;

        Ok(MarketUser {
            id: row.id,
            display_name: row.display_name,
            role,
            country,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Inserts a user.
    ///
    /// ## Returns
    /// * `Err(DbError::Validation)` - empty id or display name
    /// * `Err(DbError::UniqueViolation)` - id already exists
    pub async fn insert(&self, user: &MarketUser) -> DbResult<MarketUser> {
        debug!(id = %user.id, role = %user.role, "Inserting user");
        validate_user(user)?;

        sqlx::query(
            r#"
            INSERT INTO users (id, display_name, role, country, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&user.id)
        .bind(&user.display_name)
        .bind(user.role.as_str())
        .bind(user.country.as_str())
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => DbError::duplicate(field, &user.id),
            other => other,
        })?;

        Ok(user.clone())
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<MarketUser>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, display_name, role, country, created_at
            FROM users
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(MarketUser::try_from).transpose()
    }
}
