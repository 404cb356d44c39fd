//! Notification API Handlers

use axum::extract::{Path, Query, State};
use axum::Json;
use shared::{ApiResponse, AppResult};

use crate::auth::CurrentUser;
use crate::core::AppState;
use crate::db::models::{
    Notification, NotificationCreate, NotificationSummary, NotificationUpdate, Pagination,
};
use crate::utils::validation;

/// GET /api/notifications
pub async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(page): Query<Pagination>,
) -> AppResult<ApiResponse<Vec<Notification>>> {
    let notifications = state.notifications.find_by_user(user.id, page).await?;
    Ok(ApiResponse::success(notifications))
}

/// GET /api/notifications/summary
pub async fn summary(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<ApiResponse<NotificationSummary>> {
    let summary = state.notifications.summary(user.id).await?;
    Ok(ApiResponse::success(summary))
}

/// POST /api/notifications
pub async fn create(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(payload): Json<NotificationCreate>,
) -> AppResult<ApiResponse<Notification>> {
    validation::required(&payload.title, "title")?;
    validation::required(&payload.message, "message")?;
    let notification = state.notifications.create(payload).await?;
    Ok(ApiResponse::success(notification))
}

/// PUT /api/notifications/:id
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<NotificationUpdate>,
) -> AppResult<ApiResponse<Notification>> {
    let notification = state.notifications.update(user.id, id, payload).await?;
    Ok(ApiResponse::success(notification))
}

/// PUT /api/notifications/:id/read
pub async fn mark_read(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<()>> {
    state.notifications.mark_read(user.id, id).await?;
    Ok(ApiResponse::ok())
}

/// PUT /api/notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<ApiResponse<u64>> {
    let updated = state.notifications.mark_all_read(user.id).await?;
    Ok(ApiResponse::success(updated))
}

/// DELETE /api/notifications/:id
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<()>> {
    state.notifications.delete(user.id, id).await?;
    Ok(ApiResponse::ok())
}
