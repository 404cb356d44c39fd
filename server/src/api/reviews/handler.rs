//! Review API Handlers

use axum::extract::{Path, State};
use axum::Json;
use shared::{ApiResponse, AppResult};

use crate::auth::CurrentUser;
use crate::core::AppState;
use crate::db::models::{Review, ReviewCreate, ReviewSummary, ReviewUpdate, ReviewView};

/// GET /api/reviews/product/:product_id
pub async fn list_by_product(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
) -> AppResult<ApiResponse<Vec<ReviewView>>> {
    let reviews = state.reviews.find_by_product(product_id).await?;
    Ok(ApiResponse::success(reviews))
}

/// GET /api/reviews/product/:product_id/summary
pub async fn summary(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
) -> AppResult<ApiResponse<ReviewSummary>> {
    let summary = state.reviews.summary(product_id).await?;
    Ok(ApiResponse::success(summary))
}

/// GET /api/reviews/mine
pub async fn list_mine(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<ApiResponse<Vec<ReviewView>>> {
    let reviews = state.reviews.find_by_user(user.id).await?;
    Ok(ApiResponse::success(reviews))
}

/// POST /api/reviews
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<ReviewCreate>,
) -> AppResult<ApiResponse<Review>> {
    let review = state.reviews.create(user.id, payload).await?;
    Ok(ApiResponse::success(review))
}

/// PUT /api/reviews/:id
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<ReviewUpdate>,
) -> AppResult<ApiResponse<Review>> {
    let review = state.reviews.update(user.id, id, payload).await?;
    Ok(ApiResponse::success(review))
}

/// DELETE /api/reviews/:id
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<()>> {
    state.reviews.delete(user.id, id).await?;
    Ok(ApiResponse::ok())
}
