//! User notification model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub message: String,
    /// Free-form kind tag, e.g. "Order", "Campaign", "System"
    pub kind: String,
    pub action_url: Option<String>,
    pub is_read: bool,
    pub read_at: Option<i64>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationCreate {
    pub user_id: i64,
    pub title: String,
    pub message: String,
    #[serde(default = "default_kind")]
    pub kind: String,
    pub action_url: Option<String>,
}

fn default_kind() -> String {
    "System".to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationUpdate {
    pub is_read: Option<bool>,
}

/// Unread badge counter
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSummary {
    pub total: i64,
    pub unread: i64,
}
