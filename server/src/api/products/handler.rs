//! Product API Handlers

use axum::extract::{Path, Query, State};
use axum::Json;
use shared::{ApiResponse, AppResult};

use crate::core::AppState;
use crate::db::models::{Product, ProductCreate, ProductFilter, ProductUpdate};
use crate::utils::validation;

/// GET /api/products
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> AppResult<ApiResponse<Vec<Product>>> {
    let products = state.products.find_all(filter).await?;
    Ok(ApiResponse::success(products))
}

/// GET /api/products/featured
pub async fn featured(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<Product>>> {
    let products = state.products.find_featured().await?;
    Ok(ApiResponse::success(products))
}

/// GET /api/products/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<Product>> {
    let product = state.products.find_by_id(id).await?;
    Ok(ApiResponse::success(product))
}

/// POST /api/products
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<ApiResponse<Product>> {
    validation::required(&payload.product_name, "productName")?;
    let product = state.products.create(payload).await?;
    tracing::info!(product_id = product.id, "Product created");
    Ok(ApiResponse::success(product))
}

/// PUT /api/products/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<ApiResponse<Product>> {
    let product = state.products.update(id, payload).await?;
    Ok(ApiResponse::success(product))
}

/// DELETE /api/products/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<()>> {
    state.products.delete(id).await?;
    tracing::info!(product_id = id, "Product deleted");
    Ok(ApiResponse::ok())
}
