//! Category API Handlers

use axum::extract::{Path, State};
use axum::Json;
use shared::{ApiResponse, AppResult};

use crate::core::AppState;
use crate::db::models::{Category, CategoryCreate, CategoryUpdate};

/// GET /api/categories
pub async fn list(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<Category>>> {
    let categories = state.categories.find_all().await?;
    Ok(ApiResponse::success(categories))
}

/// GET /api/categories/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<Category>> {
    let category = state.categories.find_by_id(id).await?;
    Ok(ApiResponse::success(category))
}

/// POST /api/categories
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<ApiResponse<Category>> {
    let category = state.categories.create(payload).await?;
    tracing::info!(category_id = category.id, "Category created");
    Ok(ApiResponse::success(category))
}

/// PUT /api/categories/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<CategoryUpdate>,
) -> AppResult<ApiResponse<Category>> {
    let category = state.categories.update(id, payload).await?;
    Ok(ApiResponse::success(category))
}

/// DELETE /api/categories/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<()>> {
    state.categories.delete(id).await?;
    tracing::info!(category_id = id, "Category deleted");
    Ok(ApiResponse::ok())
}
