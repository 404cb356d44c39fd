//! Auth API Handlers

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use shared::{ApiResponse, AppError, AppResult};

use crate::auth::{hash_password, verify_password, CurrentUser};
use crate::core::AppState;
use crate::db::models::{UserUpdate, UserView};
use crate::utils::validation;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user: UserView,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<ApiResponse<AuthResponse>> {
    let email = validation::email(&payload.email)?;
    validation::password(&payload.password)?;
    validation::required(&payload.first_name, "firstName")?;
    validation::required(&payload.last_name, "lastName")?;

    let password_hash = hash_password(&payload.password)?;
    let user = state
        .users
        .create(
            &email,
            &password_hash,
            payload.first_name.trim(),
            payload.last_name.trim(),
        )
        .await?;

    let token = state.jwt.issue(user.id, &user.email)?;
    tracing::info!(user_id = user.id, "User registered");
    Ok(ApiResponse::success(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    headers: http::HeaderMap,
    Json(payload): Json<LoginRequest>,
) -> AppResult<ApiResponse<AuthResponse>> {
    let email = validation::email(&payload.email)?;
    let user_agent = headers
        .get(http::header::USER_AGENT)
        .and_then(|h| h.to_str().ok());

    let user = state
        .users
        .find_by_email(&email)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    if !verify_password(&payload.password, &user.password_hash)? {
        // Best effort; a failed audit write must not mask the 401.
        if let Err(e) = state
            .login_history
            .record(user.id, None, user_agent, false, Some("wrong password"))
            .await
        {
            tracing::warn!(error = %e, "Failed to record login attempt");
        }
        return Err(AppError::invalid_credentials());
    }

    if let Err(e) = state
        .login_history
        .record(user.id, None, user_agent, true, None)
        .await
    {
        tracing::warn!(error = %e, "Failed to record login");
    }

    let token = state.jwt.issue(user.id, &user.email)?;
    tracing::info!(user_id = user.id, "User logged in");
    Ok(ApiResponse::success(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// POST /api/auth/logout
///
/// Tokens are stateless; the server only acknowledges so clients have a
/// single call site for discarding their copy.
pub async fn logout(user: CurrentUser) -> AppResult<ApiResponse<()>> {
    tracing::info!(user_id = user.id, "User logged out");
    Ok(ApiResponse::ok_with_message("Logged out"))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<ApiResponse<UserView>> {
    let user = state.users.find_by_id(user.id).await?;
    Ok(ApiResponse::success(user.into()))
}

/// PUT /api/auth/me
pub async fn update_profile(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<UserUpdate>,
) -> AppResult<ApiResponse<UserView>> {
    let updated = state.users.update_profile(user.id, payload).await?;
    Ok(ApiResponse::success(updated.into()))
}

/// PUT /api/auth/password
pub async fn change_password(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<ChangePasswordRequest>,
) -> AppResult<ApiResponse<()>> {
    validation::password(&payload.new_password)?;

    let stored = state.users.find_by_id(user.id).await?;
    if !verify_password(&payload.current_password, &stored.password_hash)? {
        return Err(AppError::new(shared::ErrorCode::PasswordMismatch));
    }

    let new_hash = hash_password(&payload.new_password)?;
    state.users.update_password(user.id, &new_hash).await?;
    tracing::info!(user_id = user.id, "Password changed");
    Ok(ApiResponse::ok_with_message("Password updated"))
}
