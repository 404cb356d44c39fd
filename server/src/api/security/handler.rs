//! Account security API Handlers

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use shared::{ApiResponse, AppError, AppResult, ErrorCode};

use crate::auth::{verify_password, CurrentUser};
use crate::core::AppState;
use crate::db::models::{LoginEntry, UserView};
use crate::utils::validation;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    20
}

/// Security overview: account identity plus recent sign-in activity
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityInfo {
    pub user_id: i64,
    pub email: String,
    pub is_email_verified: bool,
    pub last_login_at: Option<i64>,
    pub last_login_ip: Option<String>,
    pub recent_logins: Vec<LoginEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmailRequest {
    pub new_email: String,
    pub current_password: String,
}

/// GET /api/security/info
pub async fn info(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<ApiResponse<SecurityInfo>> {
    let account = state.users.find_by_id(user.id).await?;
    let recent_logins = state.login_history.find_by_user(user.id, 5).await?;
    let last_success = recent_logins.iter().find(|e| e.is_successful);

    Ok(ApiResponse::success(SecurityInfo {
        user_id: account.id,
        email: account.email,
        is_email_verified: account.is_email_verified,
        last_login_at: last_success.map(|e| e.login_at),
        last_login_ip: last_success.and_then(|e| e.ip_address.clone()),
        recent_logins,
    }))
}

/// PUT /api/security/email
pub async fn update_email(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<UpdateEmailRequest>,
) -> AppResult<ApiResponse<UserView>> {
    let email = validation::email(&payload.new_email)?;

    let stored = state.users.find_by_id(user.id).await?;
    if !verify_password(&payload.current_password, &stored.password_hash)? {
        return Err(AppError::new(ErrorCode::PasswordMismatch));
    }

    let updated = state.users.update_email(user.id, &email).await?;
    tracing::info!(user_id = user.id, "Email changed");
    Ok(ApiResponse::success(updated.into()))
}

/// GET /api/security/login-history
pub async fn login_history(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<HistoryQuery>,
) -> AppResult<ApiResponse<Vec<LoginEntry>>> {
    let entries = state.login_history.find_by_user(user.id, query.limit).await?;
    Ok(ApiResponse::success(entries))
}
