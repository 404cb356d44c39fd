//! Favorite Repository

use super::{RepoError, RepoResult};
use crate::db::models::{Favorite, FavoriteView};
use crate::db::DbService;
use shared::util::{now_millis, snowflake_id};
use shared::ErrorCode;

#[derive(Clone)]
pub struct FavoriteRepository {
    db: DbService,
}

impl FavoriteRepository {
    pub fn new(db: DbService) -> Self {
        Self { db }
    }

    /// List a user's favorites with product display fields, newest first
    pub async fn find_by_user(&self, user_id: i64) -> RepoResult<Vec<FavoriteView>> {
        let favorites = sqlx::query_as(
            "SELECT f.id, f.product_id, p.product_name, p.unit_price, p.discount, \
             p.image_url, f.created_at \
             FROM favorites f JOIN products p ON p.id = f.product_id \
             WHERE f.user_id = ? AND f.is_active = 1 AND p.is_active = 1 \
             ORDER BY f.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(self.db.read())
        .await?;
        Ok(favorites)
    }

    /// Add a product to the user's favorites. Re-adding is rejected.
    pub async fn create(&self, user_id: i64, product_id: i64) -> RepoResult<Favorite> {
        let mut tx = self.db.write().begin().await?;
        let now = now_millis();

        let product: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM products WHERE id = ? AND is_active = 1")
                .bind(product_id)
                .fetch_optional(&mut *tx)
                .await?;
        if product.is_none() {
            return Err(RepoError::NotFound(ErrorCode::ProductNotFound));
        }

        let dup: Option<(i64,)> = sqlx::query_as(
            "SELECT id FROM favorites WHERE user_id = ? AND product_id = ? AND is_active = 1",
        )
        .bind(user_id)
        .bind(product_id)
        .fetch_optional(&mut *tx)
        .await?;
        if dup.is_some() {
            return Err(RepoError::Conflict(
                ErrorCode::AlreadyFavorite,
                "Product is already in favorites".into(),
            ));
        }

        let id = snowflake_id();
        sqlx::query(
            "INSERT INTO favorites (id, user_id, product_id, is_active, created_at, updated_at) \
             VALUES (?, ?, ?, 1, ?, ?)",
        )
        .bind(id)
        .bind(user_id)
        .bind(product_id)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(Favorite {
            id,
            user_id,
            product_id,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Remove a product from the user's favorites
    pub async fn delete_by_product(&self, user_id: i64, product_id: i64) -> RepoResult<()> {
        let result = sqlx::query(
            "UPDATE favorites SET is_active = 0, updated_at = ? \
             WHERE user_id = ? AND product_id = ? AND is_active = 1",
        )
        .bind(now_millis())
        .bind(user_id)
        .bind(product_id)
        .execute(self.db.write())
        .await?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(ErrorCode::FavoriteNotFound));
        }
        Ok(())
    }

    /// Is the product in the user's favorites?
    pub async fn exists(&self, user_id: i64, product_id: i64) -> RepoResult<bool> {
        let found: Option<(i64,)> = sqlx::query_as(
            "SELECT id FROM favorites WHERE user_id = ? AND product_id = ? AND is_active = 1",
        )
        .bind(user_id)
        .bind(product_id)
        .fetch_optional(self.db.read())
        .await?;
        Ok(found.is_some())
    }
}
