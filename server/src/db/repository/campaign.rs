//! Campaign Repository

use super::{RepoError, RepoResult};
use crate::db::models::Campaign;
use crate::db::DbService;
use shared::util::now_millis;
use shared::ErrorCode;

#[derive(Clone)]
pub struct CampaignRepository {
    db: DbService,
}

impl CampaignRepository {
    pub fn new(db: DbService) -> Self {
        Self { db }
    }

    /// List campaigns currently running (inside their date window, if set)
    pub async fn find_active(&self) -> RepoResult<Vec<Campaign>> {
        let now = now_millis();
        let campaigns = sqlx::query_as(
            "SELECT * FROM campaigns WHERE is_active = 1 \
             AND (start_date IS NULL OR start_date <= ?) \
             AND (end_date IS NULL OR end_date >= ?) \
             ORDER BY created_at DESC",
        )
        .bind(now)
        .bind(now)
        .fetch_all(self.db.read())
        .await?;
        Ok(campaigns)
    }

    /// Fetch one active campaign
    pub async fn find_by_id(&self, id: i64) -> RepoResult<Campaign> {
        let campaign: Option<Campaign> =
            sqlx::query_as("SELECT * FROM campaigns WHERE id = ? AND is_active = 1")
                .bind(id)
                .fetch_optional(self.db.read())
                .await?;
        campaign.ok_or(RepoError::NotFound(ErrorCode::CampaignNotFound))
    }
}
