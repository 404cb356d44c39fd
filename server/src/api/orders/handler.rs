//! Order API Handlers

use axum::extract::{Path, Query, State};
use axum::Json;
use shared::{ApiResponse, AppResult};

use crate::auth::CurrentUser;
use crate::core::AppState;
use crate::db::models::{
    Order, OrderCreate, OrderDetail, OrderStatusUpdate, Pagination,
};
use crate::utils::validation;

/// POST /api/orders
pub async fn place(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<OrderCreate>,
) -> AppResult<ApiResponse<OrderDetail>> {
    validation::required(&payload.shipping_address, "shippingAddress")?;
    let order = state.orders.place(user.id, payload).await?;
    Ok(ApiResponse::success_with_message("Order placed", order))
}

/// GET /api/orders
pub async fn list_mine(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(page): Query<Pagination>,
) -> AppResult<ApiResponse<Vec<OrderDetail>>> {
    let orders = state.orders.find_by_user(user.id, page).await?;
    Ok(ApiResponse::success(orders))
}

/// GET /api/orders/all
pub async fn list_all(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(page): Query<Pagination>,
) -> AppResult<ApiResponse<Vec<OrderDetail>>> {
    let orders = state.orders.find_all(page).await?;
    Ok(ApiResponse::success(orders))
}

/// GET /api/orders/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<OrderDetail>> {
    let order = state.orders.find_for_user(user.id, id).await?;
    Ok(ApiResponse::success(order))
}

/// POST /api/orders/:id/cancel
pub async fn cancel(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<Order>> {
    let order = state.orders.cancel(user.id, id).await?;
    Ok(ApiResponse::success_with_message("Order cancelled", order))
}

/// PUT /api/orders/:id/status
pub async fn update_status(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<ApiResponse<Order>> {
    let status = payload.status.parse()?;
    let order = state.orders.update_status(id, status).await?;
    Ok(ApiResponse::success(order))
}
