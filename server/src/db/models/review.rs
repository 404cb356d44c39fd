//! Product review model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i64,
    pub user_id: i64,
    pub product_id: i64,
    /// 1 to 5 inclusive
    pub rating: i64,
    pub title: Option<String>,
    pub comment: Option<String>,
    /// Set when the reviewer has a delivered order containing the product
    pub is_verified: bool,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewCreate {
    pub product_id: i64,
    pub rating: i64,
    pub title: Option<String>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewUpdate {
    pub rating: Option<i64>,
    pub title: Option<String>,
    pub comment: Option<String>,
}

/// Review joined with the reviewer's name for product pages
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ReviewView {
    pub id: i64,
    pub user_id: i64,
    pub user_name: String,
    pub product_id: i64,
    pub rating: i64,
    pub title: Option<String>,
    pub comment: Option<String>,
    pub is_verified: bool,
    pub created_at: i64,
}

/// Aggregate rating for a product, with a per-star distribution
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    pub product_id: i64,
    pub review_count: i64,
    pub average_rating: f64,
    pub rating1_count: i64,
    pub rating2_count: i64,
    pub rating3_count: i64,
    pub rating4_count: i64,
    pub rating5_count: i64,
}
