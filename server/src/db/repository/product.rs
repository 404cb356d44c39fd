//! Product Repository

use super::{RepoError, RepoResult};
use crate::db::models::{Product, ProductCreate, ProductFilter, ProductUpdate};
use crate::db::DbService;
use shared::util::{now_millis, snowflake_id};
use shared::ErrorCode;
use sqlx::QueryBuilder;

#[derive(Clone)]
pub struct ProductRepository {
    db: DbService,
}

impl ProductRepository {
    pub fn new(db: DbService) -> Self {
        Self { db }
    }

    /// List active products with optional category and search filters
    pub async fn find_all(&self, filter: ProductFilter) -> RepoResult<Vec<Product>> {
        let mut qb = QueryBuilder::new("SELECT * FROM products WHERE is_active = 1");
        if let Some(category_id) = filter.category_id {
            qb.push(" AND category_id = ").push_bind(category_id);
        }
        if let Some(search) = filter.search.filter(|s| !s.trim().is_empty()) {
            let pattern = format!("%{}%", search.trim());
            qb.push(" AND (product_name LIKE ")
                .push_bind(pattern.clone())
                .push(" OR description LIKE ")
                .push_bind(pattern)
                .push(")");
        }
        let page_size = filter.page_size.unwrap_or(20).clamp(1, 100) as i64;
        let page = filter.page.unwrap_or(1).max(1) as i64;
        qb.push(" ORDER BY product_name LIMIT ")
            .push_bind(page_size)
            .push(" OFFSET ")
            .push_bind((page - 1) * page_size);

        let products = qb.build_query_as().fetch_all(self.db.read()).await?;
        Ok(products)
    }

    /// Products promoted on the storefront: heavily discounted, best deal first
    pub async fn find_featured(&self) -> RepoResult<Vec<Product>> {
        let products = sqlx::query_as(
            "SELECT * FROM products WHERE is_active = 1 AND discount > 20 \
             ORDER BY discount DESC, product_name",
        )
        .fetch_all(self.db.read())
        .await?;
        Ok(products)
    }

    /// Fetch one active product
    pub async fn find_by_id(&self, id: i64) -> RepoResult<Product> {
        let product: Option<Product> =
            sqlx::query_as("SELECT * FROM products WHERE id = ? AND is_active = 1")
                .bind(id)
                .fetch_optional(self.db.read())
                .await?;
        product.ok_or(RepoError::NotFound(ErrorCode::ProductNotFound))
    }

    /// Create a product. Names are unique among active products.
    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        validate_product_fields(data.unit_price, data.unit_in_stock, data.discount)?;

        let mut tx = self.db.write().begin().await?;
        let now = now_millis();

        let category: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM categories WHERE id = ? AND is_active = 1")
                .bind(data.category_id)
                .fetch_optional(&mut *tx)
                .await?;
        if category.is_none() {
            return Err(RepoError::NotFound(ErrorCode::CategoryNotFound));
        }

        let dup: Option<(i64,)> = sqlx::query_as(
            "SELECT id FROM products WHERE product_name = ? AND is_active = 1",
        )
        .bind(&data.product_name)
        .fetch_optional(&mut *tx)
        .await?;
        if dup.is_some() {
            return Err(RepoError::Conflict(
                ErrorCode::ProductNameExists,
                format!("Product '{}' already exists", data.product_name),
            ));
        }

        let id = snowflake_id();
        sqlx::query(
            "INSERT INTO products (id, product_name, unit_price, unit_in_stock, \
             quantity_per_unit, description, image_url, discount, category_id, \
             is_active, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 1, ?, ?)",
        )
        .bind(id)
        .bind(&data.product_name)
        .bind(data.unit_price)
        .bind(data.unit_in_stock)
        .bind(&data.quantity_per_unit)
        .bind(&data.description)
        .bind(&data.image_url)
        .bind(data.discount)
        .bind(data.category_id)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(Product {
            id,
            product_name: data.product_name,
            unit_price: data.unit_price,
            unit_in_stock: data.unit_in_stock,
            quantity_per_unit: data.quantity_per_unit,
            description: data.description,
            image_url: data.image_url,
            discount: data.discount,
            category_id: data.category_id,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a partial update to a product
    pub async fn update(&self, id: i64, data: ProductUpdate) -> RepoResult<Product> {
        let mut tx = self.db.write().begin().await?;
        let now = now_millis();

        let product: Option<Product> =
            sqlx::query_as("SELECT * FROM products WHERE id = ? AND is_active = 1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let mut product = product.ok_or(RepoError::NotFound(ErrorCode::ProductNotFound))?;

        if let Some(name) = data.product_name {
            let dup: Option<(i64,)> = sqlx::query_as(
                "SELECT id FROM products WHERE product_name = ? AND id != ? AND is_active = 1",
            )
            .bind(&name)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
            if dup.is_some() {
                return Err(RepoError::Conflict(
                    ErrorCode::ProductNameExists,
                    format!("Product '{name}' already exists"),
                ));
            }
            product.product_name = name;
        }
        if let Some(category_id) = data.category_id {
            let category: Option<(i64,)> =
                sqlx::query_as("SELECT id FROM categories WHERE id = ? AND is_active = 1")
                    .bind(category_id)
                    .fetch_optional(&mut *tx)
                    .await?;
            if category.is_none() {
                return Err(RepoError::NotFound(ErrorCode::CategoryNotFound));
            }
            product.category_id = category_id;
        }
        if let Some(price) = data.unit_price {
            product.unit_price = price;
        }
        if let Some(stock) = data.unit_in_stock {
            product.unit_in_stock = stock;
        }
        if let Some(discount) = data.discount {
            product.discount = discount;
        }
        if data.quantity_per_unit.is_some() {
            product.quantity_per_unit = data.quantity_per_unit;
        }
        if data.description.is_some() {
            product.description = data.description;
        }
        if data.image_url.is_some() {
            product.image_url = data.image_url;
        }

        validate_product_fields(product.unit_price, product.unit_in_stock, product.discount)?;
        product.updated_at = now;

        sqlx::query(
            "UPDATE products SET product_name = ?, unit_price = ?, unit_in_stock = ?, \
             quantity_per_unit = ?, description = ?, image_url = ?, discount = ?, \
             category_id = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&product.product_name)
        .bind(product.unit_price)
        .bind(product.unit_in_stock)
        .bind(&product.quantity_per_unit)
        .bind(&product.description)
        .bind(&product.image_url)
        .bind(product.discount)
        .bind(product.category_id)
        .bind(now)
        .bind(id)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(product)
    }

    /// Soft-delete a product
    pub async fn delete(&self, id: i64) -> RepoResult<()> {
        let result = sqlx::query(
            "UPDATE products SET is_active = 0, updated_at = ? WHERE id = ? AND is_active = 1",
        )
        .bind(now_millis())
        .bind(id)
        .execute(self.db.write())
        .await?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(ErrorCode::ProductNotFound));
        }
        Ok(())
    }
}

fn validate_product_fields(unit_price: f64, unit_in_stock: i64, discount: i64) -> RepoResult<()> {
    if !unit_price.is_finite() || unit_price < 0.0 {
        return Err(RepoError::Validation(
            "Unit price must be non-negative".into(),
        ));
    }
    if unit_in_stock < 0 {
        return Err(RepoError::Validation("Stock must be non-negative".into()));
    }
    if !(0..=100).contains(&discount) {
        return Err(RepoError::Validation(
            "Discount must be between 0 and 100".into(),
        ));
    }
    Ok(())
}
