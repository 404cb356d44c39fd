//! Review Repository

use super::{RepoError, RepoResult};
use crate::db::models::{Review, ReviewCreate, ReviewSummary, ReviewUpdate, ReviewView};
use crate::db::DbService;
use shared::util::{now_millis, snowflake_id};
use shared::ErrorCode;

#[derive(Clone)]
pub struct ReviewRepository {
    db: DbService,
}

const VIEW_SELECT: &str = "SELECT r.id, r.user_id, \
     u.first_name || ' ' || u.last_name AS user_name, r.product_id, r.rating, \
     r.title, r.comment, r.is_verified, r.created_at \
     FROM reviews r JOIN users u ON u.id = r.user_id";

impl ReviewRepository {
    pub fn new(db: DbService) -> Self {
        Self { db }
    }

    /// List a product's active reviews, newest first
    pub async fn find_by_product(&self, product_id: i64) -> RepoResult<Vec<ReviewView>> {
        let sql = format!(
            "{VIEW_SELECT} WHERE r.product_id = ? AND r.is_active = 1 ORDER BY r.created_at DESC"
        );
        let reviews = sqlx::query_as(&sql)
            .bind(product_id)
            .fetch_all(self.db.read())
            .await?;
        Ok(reviews)
    }

    /// List a user's active reviews, newest first
    pub async fn find_by_user(&self, user_id: i64) -> RepoResult<Vec<ReviewView>> {
        let sql = format!(
            "{VIEW_SELECT} WHERE r.user_id = ? AND r.is_active = 1 ORDER BY r.created_at DESC"
        );
        let reviews = sqlx::query_as(&sql)
            .bind(user_id)
            .fetch_all(self.db.read())
            .await?;
        Ok(reviews)
    }

    /// Aggregate rating and per-star distribution for a product
    pub async fn summary(&self, product_id: i64) -> RepoResult<ReviewSummary> {
        let summary = sqlx::query_as(
            "SELECT ? AS product_id, COUNT(*) AS review_count, \
             COALESCE(AVG(rating), 0.0) AS average_rating, \
             COALESCE(SUM(rating = 1), 0) AS rating1_count, \
             COALESCE(SUM(rating = 2), 0) AS rating2_count, \
             COALESCE(SUM(rating = 3), 0) AS rating3_count, \
             COALESCE(SUM(rating = 4), 0) AS rating4_count, \
             COALESCE(SUM(rating = 5), 0) AS rating5_count \
             FROM reviews WHERE product_id = ? AND is_active = 1",
        )
        .bind(product_id)
        .bind(product_id)
        .fetch_one(self.db.read())
        .await?;
        Ok(summary)
    }

    /// Create a review. One active review per (user, product).
    pub async fn create(&self, user_id: i64, data: ReviewCreate) -> RepoResult<Review> {
        validate_rating(data.rating)?;

        let mut tx = self.db.write().begin().await?;
        let now = now_millis();

        let product: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM products WHERE id = ? AND is_active = 1")
                .bind(data.product_id)
                .fetch_optional(&mut *tx)
                .await?;
        if product.is_none() {
            return Err(RepoError::NotFound(ErrorCode::ProductNotFound));
        }

        let dup: Option<(i64,)> = sqlx::query_as(
            "SELECT id FROM reviews WHERE user_id = ? AND product_id = ? AND is_active = 1",
        )
        .bind(user_id)
        .bind(data.product_id)
        .fetch_optional(&mut *tx)
        .await?;
        if dup.is_some() {
            return Err(RepoError::Conflict(
                ErrorCode::DuplicateReview,
                "You have already reviewed this product".into(),
            ));
        }

        let id = snowflake_id();
        sqlx::query(
            "INSERT INTO reviews (id, user_id, product_id, rating, title, comment, \
             is_verified, is_active, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, 0, 1, ?, ?)",
        )
        .bind(id)
        .bind(user_id)
        .bind(data.product_id)
        .bind(data.rating)
        .bind(&data.title)
        .bind(&data.comment)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(Review {
            id,
            user_id,
            product_id: data.product_id,
            rating: data.rating,
            title: data.title,
            comment: data.comment,
            is_verified: false,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Update the caller's review
    pub async fn update(&self, user_id: i64, id: i64, data: ReviewUpdate) -> RepoResult<Review> {
        let mut tx = self.db.write().begin().await?;
        let now = now_millis();

        let review: Option<Review> = sqlx::query_as(
            "SELECT * FROM reviews WHERE id = ? AND user_id = ? AND is_active = 1",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;
        let mut review = review.ok_or(RepoError::NotFound(ErrorCode::ReviewNotFound))?;

        if let Some(rating) = data.rating {
            validate_rating(rating)?;
            review.rating = rating;
        }
        if data.title.is_some() {
            review.title = data.title;
        }
        if data.comment.is_some() {
            review.comment = data.comment;
        }
        review.updated_at = now;

        sqlx::query(
            "UPDATE reviews SET rating = ?, title = ?, comment = ?, updated_at = ? WHERE id = ?",
        )
        .bind(review.rating)
        .bind(&review.title)
        .bind(&review.comment)
        .bind(now)
        .bind(id)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(review)
    }

    /// Soft-delete the caller's review
    pub async fn delete(&self, user_id: i64, id: i64) -> RepoResult<()> {
        let result = sqlx::query(
            "UPDATE reviews SET is_active = 0, updated_at = ? \
             WHERE id = ? AND user_id = ? AND is_active = 1",
        )
        .bind(now_millis())
        .bind(id)
        .bind(user_id)
        .execute(self.db.write())
        .await?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(ErrorCode::ReviewNotFound));
        }
        Ok(())
    }
}

fn validate_rating(rating: i64) -> RepoResult<()> {
    if !(1..=5).contains(&rating) {
        return Err(RepoError::InvalidState(
            ErrorCode::InvalidRating,
            "Rating must be between 1 and 5".into(),
        ));
    }
    Ok(())
}
