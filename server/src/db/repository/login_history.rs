//! Login History Repository
//!
//! Append-only audit trail. Recording a login must never fail the login
//! itself, so callers log and drop errors from [`record`].

use super::RepoResult;
use crate::db::models::LoginEntry;
use crate::db::DbService;
use shared::util::{now_millis, snowflake_id};

#[derive(Clone)]
pub struct LoginHistoryRepository {
    db: DbService,
}

impl LoginHistoryRepository {
    pub fn new(db: DbService) -> Self {
        Self { db }
    }

    /// Append a login attempt
    pub async fn record(
        &self,
        user_id: i64,
        ip_address: Option<&str>,
        user_agent: Option<&str>,
        is_successful: bool,
        failure_reason: Option<&str>,
    ) -> RepoResult<()> {
        sqlx::query(
            "INSERT INTO login_history (id, user_id, login_at, ip_address, user_agent, \
             is_successful, failure_reason) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(snowflake_id())
        .bind(user_id)
        .bind(now_millis())
        .bind(ip_address)
        .bind(user_agent)
        .bind(is_successful)
        .bind(failure_reason)
        .execute(self.db.write())
        .await?;
        Ok(())
    }

    /// Most recent login attempts for a user
    pub async fn find_by_user(&self, user_id: i64, limit: i64) -> RepoResult<Vec<LoginEntry>> {
        let entries = sqlx::query_as(
            "SELECT * FROM login_history WHERE user_id = ? ORDER BY login_at DESC LIMIT ?",
        )
        .bind(user_id)
        .bind(limit.clamp(1, 100))
        .fetch_all(self.db.read())
        .await?;
        Ok(entries)
    }
}
