//! Login history model

use serde::{Deserialize, Serialize};

/// Append-only login audit record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LoginEntry {
    pub id: i64,
    pub user_id: i64,
    pub login_at: i64,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub is_successful: bool,
    pub failure_reason: Option<String>,
}
