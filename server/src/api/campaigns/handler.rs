//! Campaign API Handlers

use axum::extract::{Path, State};
use shared::{ApiResponse, AppResult};

use crate::core::AppState;
use crate::db::models::Campaign;

/// GET /api/campaigns
pub async fn list(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<Campaign>>> {
    let campaigns = state.campaigns.find_active().await?;
    Ok(ApiResponse::success(campaigns))
}

/// GET /api/campaigns/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<Campaign>> {
    let campaign = state.campaigns.find_by_id(id).await?;
    Ok(ApiResponse::success(campaign))
}
