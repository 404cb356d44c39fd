//! Notification Repository

use super::{RepoError, RepoResult};
use crate::db::models::{
    Notification, NotificationCreate, NotificationSummary, NotificationUpdate, Pagination,
};
use crate::db::DbService;
use shared::util::{now_millis, snowflake_id};
use shared::ErrorCode;

#[derive(Clone)]
pub struct NotificationRepository {
    db: DbService,
}

impl NotificationRepository {
    pub fn new(db: DbService) -> Self {
        Self { db }
    }

    /// List a user's notifications, newest first
    pub async fn find_by_user(
        &self,
        user_id: i64,
        page: Pagination,
    ) -> RepoResult<Vec<Notification>> {
        let notifications = sqlx::query_as(
            "SELECT * FROM notifications WHERE user_id = ? AND is_active = 1 \
             ORDER BY created_at DESC LIMIT ? OFFSET ?",
        )
        .bind(user_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.db.read())
        .await?;
        Ok(notifications)
    }

    /// Total and unread counts for the badge
    pub async fn summary(&self, user_id: i64) -> RepoResult<NotificationSummary> {
        let summary = sqlx::query_as(
            "SELECT COUNT(*) AS total, COALESCE(SUM(is_read = 0), 0) AS unread \
             FROM notifications WHERE user_id = ? AND is_active = 1",
        )
        .bind(user_id)
        .fetch_one(self.db.read())
        .await?;
        Ok(summary)
    }

    /// Create a notification
    pub async fn create(&self, data: NotificationCreate) -> RepoResult<Notification> {
        let id = snowflake_id();
        let now = now_millis();
        sqlx::query(
            "INSERT INTO notifications (id, user_id, title, message, kind, action_url, \
             is_read, is_active, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, 0, 1, ?, ?)",
        )
        .bind(id)
        .bind(data.user_id)
        .bind(&data.title)
        .bind(&data.message)
        .bind(&data.kind)
        .bind(&data.action_url)
        .bind(now)
        .bind(now)
        .execute(self.db.write())
        .await?;

        Ok(Notification {
            id,
            user_id: data.user_id,
            title: data.title,
            message: data.message,
            kind: data.kind,
            action_url: data.action_url,
            is_read: false,
            read_at: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Flip the read flag on one of the user's notifications
    pub async fn update(
        &self,
        user_id: i64,
        id: i64,
        data: NotificationUpdate,
    ) -> RepoResult<Notification> {
        let notification: Option<Notification> = sqlx::query_as(
            "SELECT * FROM notifications WHERE id = ? AND user_id = ? AND is_active = 1",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.db.read())
        .await?;
        let mut notification =
            notification.ok_or(RepoError::NotFound(ErrorCode::NotificationNotFound))?;

        if let Some(is_read) = data.is_read {
            let now = now_millis();
            notification.is_read = is_read;
            notification.read_at = is_read.then_some(now);
            notification.updated_at = now;
            sqlx::query(
                "UPDATE notifications SET is_read = ?, read_at = ?, updated_at = ? WHERE id = ?",
            )
            .bind(is_read)
            .bind(notification.read_at)
            .bind(now)
            .bind(id)
            .execute(self.db.write())
            .await?;
        }
        Ok(notification)
    }

    /// Mark one of the user's notifications as read
    pub async fn mark_read(&self, user_id: i64, id: i64) -> RepoResult<()> {
        let now = now_millis();
        let result = sqlx::query(
            "UPDATE notifications SET is_read = 1, read_at = ?, updated_at = ? \
             WHERE id = ? AND user_id = ? AND is_active = 1",
        )
        .bind(now)
        .bind(now)
        .bind(id)
        .bind(user_id)
        .execute(self.db.write())
        .await?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(ErrorCode::NotificationNotFound));
        }
        Ok(())
    }

    /// Mark all of the user's notifications as read
    pub async fn mark_all_read(&self, user_id: i64) -> RepoResult<u64> {
        let now = now_millis();
        let result = sqlx::query(
            "UPDATE notifications SET is_read = 1, read_at = ?, updated_at = ? \
             WHERE user_id = ? AND is_read = 0 AND is_active = 1",
        )
        .bind(now)
        .bind(now)
        .bind(user_id)
        .execute(self.db.write())
        .await?;
        Ok(result.rows_affected())
    }

    /// Soft-delete one of the user's notifications
    pub async fn delete(&self, user_id: i64, id: i64) -> RepoResult<()> {
        let result = sqlx::query(
            "UPDATE notifications SET is_active = 0, updated_at = ? \
             WHERE id = ? AND user_id = ? AND is_active = 1",
        )
        .bind(now_millis())
        .bind(id)
        .bind(user_id)
        .execute(self.db.write())
        .await?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(ErrorCode::NotificationNotFound));
        }
        Ok(())
    }
}
