//! Address API Handlers

use axum::extract::{Path, State};
use axum::Json;
use shared::{ApiResponse, AppResult};

use crate::auth::CurrentUser;
use crate::core::AppState;
use crate::db::models::{Address, AddressCreate, AddressUpdate};

/// GET /api/addresses
pub async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<ApiResponse<Vec<Address>>> {
    let addresses = state.addresses.find_by_user(user.id).await?;
    Ok(ApiResponse::success(addresses))
}

/// GET /api/addresses/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<Address>> {
    let address = state.addresses.find_by_id(user.id, id).await?;
    Ok(ApiResponse::success(address))
}

/// POST /api/addresses
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<AddressCreate>,
) -> AppResult<ApiResponse<Address>> {
    let address = state.addresses.create(user.id, payload).await?;
    Ok(ApiResponse::success(address))
}

/// PUT /api/addresses/:id
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<AddressUpdate>,
) -> AppResult<ApiResponse<Address>> {
    let address = state.addresses.update(user.id, id, payload).await?;
    Ok(ApiResponse::success(address))
}

/// PUT /api/addresses/:id/default
pub async fn set_default(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<Address>> {
    let address = state.addresses.set_default(user.id, id).await?;
    Ok(ApiResponse::success_with_message("Default address set", address))
}

/// DELETE /api/addresses/:id
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<()>> {
    state.addresses.delete(user.id, id).await?;
    Ok(ApiResponse::ok())
}
