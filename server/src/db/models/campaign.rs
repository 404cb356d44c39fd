//! Marketing campaign model

use serde::{Deserialize, Serialize};

/// Campaign banner. Read-only through the API; rows are seeded out of band.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: i64,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub discount: i64,
    pub image_url: Option<String>,
    pub background_color: Option<String>,
    pub button_text: Option<String>,
    pub button_href: Option<String>,
    pub start_date: Option<i64>,
    pub end_date: Option<i64>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}
