//! Payment method API Handlers
//!
//! Responses only ever carry [`PaymentMethodView`]; the stored fingerprint
//! stays inside the repository layer.

use axum::extract::{Path, State};
use axum::Json;
use shared::{ApiResponse, AppResult};

use crate::auth::CurrentUser;
use crate::core::AppState;
use crate::db::models::{PaymentMethodCreate, PaymentMethodUpdate, PaymentMethodView};

/// GET /api/payment-methods
pub async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<ApiResponse<Vec<PaymentMethodView>>> {
    let methods = state.payment_methods.find_by_user(user.id).await?;
    Ok(ApiResponse::success(
        methods.into_iter().map(PaymentMethodView::from).collect(),
    ))
}

/// GET /api/payment-methods/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<PaymentMethodView>> {
    let method = state.payment_methods.find_by_id(user.id, id).await?;
    Ok(ApiResponse::success(method.into()))
}

/// POST /api/payment-methods
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<PaymentMethodCreate>,
) -> AppResult<ApiResponse<PaymentMethodView>> {
    let method = state.payment_methods.create(user.id, payload).await?;
    Ok(ApiResponse::success(method.into()))
}

/// PUT /api/payment-methods/:id
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<PaymentMethodUpdate>,
) -> AppResult<ApiResponse<PaymentMethodView>> {
    let method = state.payment_methods.update(user.id, id, payload).await?;
    Ok(ApiResponse::success(method.into()))
}

/// PUT /api/payment-methods/:id/default
pub async fn set_default(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<PaymentMethodView>> {
    let method = state.payment_methods.set_default(user.id, id).await?;
    Ok(ApiResponse::success_with_message(
        "Default payment method set",
        method.into(),
    ))
}

/// DELETE /api/payment-methods/:id
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<()>> {
    state.payment_methods.delete(user.id, id).await?;
    Ok(ApiResponse::ok())
}
