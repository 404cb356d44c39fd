//! Product model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub product_name: String,
    pub unit_price: f64,
    pub unit_in_stock: i64,
    pub quantity_per_unit: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    /// Percent discount, 0-100
    pub discount: i64,
    pub category_id: i64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create product payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub product_name: String,
    pub unit_price: f64,
    #[serde(default)]
    pub unit_in_stock: i64,
    pub quantity_per_unit: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub discount: i64,
    pub category_id: i64,
}

/// Update product payload (all fields optional)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub product_name: Option<String>,
    pub unit_price: Option<f64>,
    pub unit_in_stock: Option<i64>,
    pub quantity_per_unit: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub discount: Option<i64>,
    pub category_id: Option<i64>,
}

/// Catalog listing filter (query string)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilter {
    pub category_id: Option<i64>,
    /// Substring match on name or description
    pub search: Option<String>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub page_size: Option<u32>,
}
