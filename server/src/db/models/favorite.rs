//! Favorite (wishlist) model

use serde::{Deserialize, Serialize};

/// Favorite row. One per (user, product); re-adding is rejected.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub id: i64,
    pub user_id: i64,
    pub product_id: i64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteCreate {
    pub product_id: i64,
}

/// Favorite joined with product display fields
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteView {
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub unit_price: f64,
    pub discount: i64,
    pub image_url: Option<String>,
    pub created_at: i64,
}
