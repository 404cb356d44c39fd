//! Favorite API Handlers

use axum::extract::{Path, State};
use axum::Json;
use shared::{ApiResponse, AppResult};

use crate::auth::CurrentUser;
use crate::core::AppState;
use crate::db::models::{Favorite, FavoriteCreate, FavoriteView};

/// GET /api/favorites
pub async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<ApiResponse<Vec<FavoriteView>>> {
    let favorites = state.favorites.find_by_user(user.id).await?;
    Ok(ApiResponse::success(favorites))
}

/// POST /api/favorites
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<FavoriteCreate>,
) -> AppResult<ApiResponse<Favorite>> {
    let favorite = state.favorites.create(user.id, payload.product_id).await?;
    Ok(ApiResponse::success(favorite))
}

/// GET /api/favorites/:product_id
pub async fn check(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(product_id): Path<i64>,
) -> AppResult<ApiResponse<bool>> {
    let exists = state.favorites.exists(user.id, product_id).await?;
    Ok(ApiResponse::success(exists))
}

/// DELETE /api/favorites/:product_id
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(product_id): Path<i64>,
) -> AppResult<ApiResponse<()>> {
    state.favorites.delete_by_product(user.id, product_id).await?;
    Ok(ApiResponse::ok())
}
