//! Category Repository

use super::{RepoError, RepoResult};
use crate::db::models::{Category, CategoryCreate, CategoryUpdate};
use crate::db::DbService;
use shared::util::{now_millis, snowflake_id};
use shared::ErrorCode;

#[derive(Clone)]
pub struct CategoryRepository {
    db: DbService,
}

impl CategoryRepository {
    pub fn new(db: DbService) -> Self {
        Self { db }
    }

    /// List active categories ordered by name
    pub async fn find_all(&self) -> RepoResult<Vec<Category>> {
        let categories = sqlx::query_as(
            "SELECT * FROM categories WHERE is_active = 1 ORDER BY category_name",
        )
        .fetch_all(self.db.read())
        .await?;
        Ok(categories)
    }

    /// Fetch one active category
    pub async fn find_by_id(&self, id: i64) -> RepoResult<Category> {
        let category: Option<Category> =
            sqlx::query_as("SELECT * FROM categories WHERE id = ? AND is_active = 1")
                .bind(id)
                .fetch_optional(self.db.read())
                .await?;
        category.ok_or(RepoError::NotFound(ErrorCode::CategoryNotFound))
    }

    /// Create a category. Names are unique among active categories.
    pub async fn create(&self, data: CategoryCreate) -> RepoResult<Category> {
        if data.category_name.trim().is_empty() {
            return Err(RepoError::Validation("Category name is required".into()));
        }

        let mut tx = self.db.write().begin().await?;
        let dup: Option<(i64,)> = sqlx::query_as(
            "SELECT id FROM categories WHERE category_name = ? AND is_active = 1",
        )
        .bind(&data.category_name)
        .fetch_optional(&mut *tx)
        .await?;
        if dup.is_some() {
            return Err(RepoError::Conflict(
                ErrorCode::CategoryNameExists,
                format!("Category '{}' already exists", data.category_name),
            ));
        }

        let id = snowflake_id();
        let now = now_millis();
        sqlx::query(
            "INSERT INTO categories (id, category_name, description, image_url, \
             is_active, created_at, updated_at) VALUES (?, ?, ?, ?, 1, ?, ?)",
        )
        .bind(id)
        .bind(&data.category_name)
        .bind(&data.description)
        .bind(&data.image_url)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(Category {
            id,
            category_name: data.category_name,
            description: data.description,
            image_url: data.image_url,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a partial update to a category
    pub async fn update(&self, id: i64, data: CategoryUpdate) -> RepoResult<Category> {
        let mut tx = self.db.write().begin().await?;
        let now = now_millis();

        let category: Option<Category> =
            sqlx::query_as("SELECT * FROM categories WHERE id = ? AND is_active = 1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let mut category = category.ok_or(RepoError::NotFound(ErrorCode::CategoryNotFound))?;

        if let Some(name) = data.category_name {
            let dup: Option<(i64,)> = sqlx::query_as(
                "SELECT id FROM categories WHERE category_name = ? AND id != ? AND is_active = 1",
            )
            .bind(&name)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
            if dup.is_some() {
                return Err(RepoError::Conflict(
                    ErrorCode::CategoryNameExists,
                    format!("Category '{name}' already exists"),
                ));
            }
            category.category_name = name;
        }
        if data.description.is_some() {
            category.description = data.description;
        }
        if data.image_url.is_some() {
            category.image_url = data.image_url;
        }
        category.updated_at = now;

        sqlx::query(
            "UPDATE categories SET category_name = ?, description = ?, image_url = ?, \
             updated_at = ? WHERE id = ?",
        )
        .bind(&category.category_name)
        .bind(&category.description)
        .bind(&category.image_url)
        .bind(now)
        .bind(id)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(category)
    }

    /// Soft-delete a category. Rejected while active products still point
    /// at it.
    pub async fn delete(&self, id: i64) -> RepoResult<()> {
        let mut tx = self.db.write().begin().await?;

        let in_use: Option<(i64,)> = sqlx::query_as(
            "SELECT id FROM products WHERE category_id = ? AND is_active = 1 LIMIT 1",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
        if in_use.is_some() {
            return Err(RepoError::Conflict(
                ErrorCode::InvalidRequest,
                "Category still has active products".into(),
            ));
        }

        let result = sqlx::query(
            "UPDATE categories SET is_active = 0, updated_at = ? WHERE id = ? AND is_active = 1",
        )
        .bind(now_millis())
        .bind(id)
        .execute(&mut *tx)
        .await?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(ErrorCode::CategoryNotFound));
        }
        tx.commit().await?;
        Ok(())
    }
}
